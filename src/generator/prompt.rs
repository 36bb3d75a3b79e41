use crate::models::{Choice, UserProfile};

/// Number of days the plan is asked to cover.
pub const PLAN_DAYS: u32 = 7;

/// Meal slots requested per day.
pub const MEAL_SLOTS: [&str; 6] = [
    "Breakfast with detailed nutrition (calories, protein, carbs, fat, fiber)",
    "Mid-morning snack with nutrition details",
    "Lunch with detailed nutrition",
    "Afternoon snack with nutrition details",
    "Dinner with detailed nutrition",
    "Optional evening snack with nutrition details",
];

/// Details requested for each meal.
pub const MEAL_DETAILS: [&str; 4] = [
    "Exact quantities of each food item",
    "Preparation method",
    "Nutrition facts (calories, protein, carbs, fat, fiber)",
    "Important micronutrients (vitamins, minerals)",
];

/// Build the generation prompt for a profile and its BMI status line.
pub fn build_prompt(profile: &UserProfile, bmi_status: &str) -> String {
    let mut prompt = format!(
        "Create a detailed {}-day personalized Indian diet plan for {}, a {}-year-old {}.\n\
         Physical details: {}kg, {}cm, BMI status: {}.\n\
         Activity level: {}. Diet type: {}.\n\
         Diet intensity: {} approach.\n\n",
        PLAN_DAYS,
        profile.name,
        profile.age,
        profile.gender.label(),
        profile.weight,
        profile.height,
        bmi_status,
        profile.activity_level.label(),
        profile.diet_type.label(),
        profile.diet_intensity.label(),
    );

    prompt.push_str("For each day, include:\n");
    for slot in MEAL_SLOTS {
        prompt.push_str(&format!("- {}\n", slot));
    }

    prompt.push_str("\nFor each meal, provide:\n");
    for detail in MEAL_DETAILS {
        prompt.push_str(&format!("- {}\n", detail));
    }

    prompt.push_str(
        "\nProvide a weekly summary with total calories and macros.\n\
         Format the output with clear headings for each day and section.",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, DietIntensity, DietType, Gender};

    fn profile() -> UserProfile {
        UserProfile {
            name: "Ravi".to_string(),
            age: 34,
            gender: Gender::Male,
            weight: 82.5,
            height: 178.0,
            diet_intensity: DietIntensity::Hardcore,
            activity_level: ActivityLevel::VeryActive,
            diet_type: DietType::NonVegetarian,
        }
    }

    #[test]
    fn test_prompt_mentions_profile() {
        let prompt = build_prompt(&profile(), "Overweight (suggested goal: lose weight)");
        assert!(prompt.starts_with(
            "Create a detailed 7-day personalized Indian diet plan for Ravi, a 34-year-old male."
        ));
        assert!(prompt.contains("Physical details: 82.5kg, 178cm, BMI status: Overweight"));
        assert!(prompt.contains("Activity level: very active. Diet type: non-vegetarian."));
        assert!(prompt.contains("Diet intensity: hardcore approach."));
    }

    #[test]
    fn test_prompt_lists_all_slots() {
        let prompt = build_prompt(&profile(), "Normal");
        for slot in MEAL_SLOTS {
            assert!(prompt.contains(slot));
        }
        assert!(prompt.ends_with("clear headings for each day and section."));
    }
}
