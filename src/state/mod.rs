mod app;
mod persistence;

pub use app::{AppState, PendingPlan};
pub use persistence::{ensure_cache_dir, load_plan, save_nutrition_csv, save_plan};
