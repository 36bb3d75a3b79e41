pub mod nutrition;
pub mod plan;
pub mod profile;

pub use nutrition::{MealNutrition, NutritionTable, NOT_AVAILABLE};
pub use plan::{DietPlan, ERROR_PREFIX};
pub use profile::{
    validate_profile, ActivityLevel, Choice, DietIntensity, DietType, Gender, ProfileForm,
    UserProfile,
};
