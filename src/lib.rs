pub mod charts;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod health;
pub mod interface;
pub mod models;
pub mod nutrition;
pub mod report;
pub mod state;

pub use error::{DietError, Result};
pub use models::{DietPlan, NutritionTable, UserProfile};
