use tracing::debug;

use crate::models::{MealNutrition, NutritionTable};

/// Token that starts every day section.
pub const DAY_MARKER: &str = "Day ";

/// Meal keywords, checked in this order against each block.
pub const MEAL_KEYWORDS: [&str; 4] = ["Breakfast", "Lunch", "Dinner", "Snack"];

const MICRONUTRIENT_MARKERS: [&str; 2] = ["Vitamin", "Mineral"];

/// Which field a line fills in.
enum LineKind {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Micronutrient,
}

impl LineKind {
    fn of(line: &str) -> Option<Self> {
        if line.contains("Calories:") {
            Some(LineKind::Calories)
        } else if line.contains("Protein:") {
            Some(LineKind::Protein)
        } else if line.contains("Carbs:") {
            Some(LineKind::Carbs)
        } else if line.contains("Fat:") {
            Some(LineKind::Fat)
        } else if line.contains("Fiber:") {
            Some(LineKind::Fiber)
        } else if MICRONUTRIENT_MARKERS.iter().any(|m| line.contains(m)) {
            Some(LineKind::Micronutrient)
        } else {
            None
        }
    }
}

/// Scan plan text into a [`NutritionTable`].
///
/// Never fails: text without day markers gives an empty table and fields that
/// are never matched stay "N/A". Running it twice on the same text gives the
/// same table.
pub fn extract(text: &str) -> NutritionTable {
    let text = text.replace("\r\n", "\n");
    let mut table = NutritionTable::new();

    for segment in text.split(DAY_MARKER).skip(1) {
        let day_number = segment.split(':').next().unwrap_or_default().trim();
        let day = format!("{}{}", DAY_MARKER, day_number);
        table.begin_day(&day);

        for block in segment.split("\n\n") {
            if let Some(meal) = classify_block(block) {
                table.set_meal(&day, meal, parse_meal(block));
            }
        }
    }

    debug!(
        days = table.len(),
        meals = table.meal_count(),
        "Extracted nutrition table"
    );
    table
}

fn classify_block(block: &str) -> Option<&'static str> {
    MEAL_KEYWORDS.iter().copied().find(|kw| block.contains(kw))
}

fn parse_meal(block: &str) -> MealNutrition {
    let mut nutrition = MealNutrition::default();

    for line in block.lines().map(str::trim) {
        let Some(kind) = LineKind::of(line) else {
            continue;
        };
        match kind {
            LineKind::Calories => nutrition.calories = label_value(line),
            LineKind::Protein => nutrition.protein = label_value(line),
            LineKind::Carbs => nutrition.carbs = label_value(line),
            LineKind::Fat => nutrition.fat = label_value(line),
            LineKind::Fiber => nutrition.fiber = label_value(line),
            LineKind::Micronutrient => nutrition.micronutrients.push(line.to_string()),
        }
    }

    nutrition
}

/// Text between the first and second colon.
fn label_value(line: &str) -> String {
    line.split(':').nth(1).unwrap_or_default().trim().to_string()
}
