use std::fmt::Write as _;
use std::io::Write;

use crate::error::Result;
use crate::models::NutritionTable;

/// Shown in place of the table before any plan has been generated.
pub const EMPTY_TABLE_MESSAGE: &str =
    "No nutrition data available. Please generate a diet plan first.";

/// Render the table as the text shown in the "Nutrition Details" view.
pub fn format_table(table: &NutritionTable) -> String {
    if table.is_empty() {
        return EMPTY_TABLE_MESSAGE.to_string();
    }

    let mut out = String::new();
    for day in table.days() {
        let _ = writeln!(out, "\n{}", day.day);
        let _ = writeln!(out, "{}", "=".repeat(50));

        for entry in &day.meals {
            let _ = writeln!(out, "\n{}", entry.meal);
            let _ = writeln!(out, "{}", "-".repeat(40));

            for (label, value) in entry.nutrition.fields() {
                let _ = writeln!(out, "{}: {}", label, value);
            }

            if !entry.nutrition.micronutrients.is_empty() {
                out.push_str("\nMicronutrients:\n");
                for micro in &entry.nutrition.micronutrients {
                    let _ = writeln!(out, "- {}", micro);
                }
            }
            out.push('\n');
        }
    }
    out
}

/// Write one CSV row per day and meal.
pub fn write_csv<W: Write>(table: &NutritionTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "day",
        "meal",
        "calories",
        "protein",
        "carbs",
        "fat",
        "fiber",
        "micronutrients",
    ])?;

    for day in table.days() {
        for entry in &day.meals {
            let n = &entry.nutrition;
            let micros = n.micronutrients.join("; ");
            csv.write_record([
                day.day.as_str(),
                entry.meal.as_str(),
                n.calories.as_str(),
                n.protein.as_str(),
                n.carbs.as_str(),
                n.fat.as_str(),
                n.fiber.as_str(),
                micros.as_str(),
            ])?;
        }
    }

    csv.flush()?;
    Ok(())
}
