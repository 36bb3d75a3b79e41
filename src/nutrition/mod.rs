//! Best-effort recovery of nutrition fields from generated plan text.
//!
//! Callers only depend on [`extract`]; the heuristic behind it can be replaced
//! without touching them.

mod extractor;
mod format;

pub use extractor::{extract, DAY_MARKER, MEAL_KEYWORDS};
pub use format::{format_table, write_csv, EMPTY_TABLE_MESSAGE};
