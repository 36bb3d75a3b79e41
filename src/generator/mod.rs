mod client;
mod prompt;

pub use client::GeminiClient;
pub use prompt::{build_prompt, MEAL_DETAILS, MEAL_SLOTS, PLAN_DAYS};
