pub mod calculations;
pub mod constants;

pub use calculations::{
    calculate_bmi, percent_to_grams, BmiBand, BmiResult, MacroGrams, MacroSplit,
};
pub use constants::*;
