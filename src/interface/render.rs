use std::path::Path;

use crate::charts::MacroChart;
use crate::health::BmiResult;
use crate::models::{DietPlan, NutritionTable};
use crate::nutrition::format_table;
use crate::report::ExportOutcome;

/// Print the raw plan text ("Diet Plan" view).
pub fn display_plan(plan: Option<&DietPlan>) {
    println!();
    println!("=== Diet Plan ===");
    println!();
    match plan {
        Some(plan) => println!("{}", plan.text()),
        None => println!("No diet plan yet. Choose 'Generate Diet' first."),
    }
    println!();
}

/// Print the extracted nutrition table ("Nutrition Details" view).
pub fn display_nutrition(table: &NutritionTable) {
    println!();
    println!("=== Nutrition Details ===");
    println!("{}", format_table(table));
}

pub fn display_bmi(result: &BmiResult) {
    println!();
    println!("--- BMI ---");
    println!("BMI: {}", result);
    println!("Suggested goal: {}", result.band.suggested_goal());
    println!();
}

/// Print both views of the macro split as text.
pub fn display_macros(chart: &MacroChart) {
    println!();
    println!("--- {} ({:.0} kcal) ---", chart.title, chart.split.calories);
    for slice in &chart.slices {
        println!(
            "{:<8} {:>5.1}%  {:>7}",
            slice.label,
            slice.percent,
            slice.grams_label()
        );
    }
    println!();
}

pub fn display_chart_saved(path: &Path) {
    println!("Chart saved to {}", path.display());
}

pub fn display_export_outcome(outcome: &ExportOutcome) {
    match outcome {
        ExportOutcome::Canceled => println!("Export canceled."),
        ExportOutcome::Saved {
            path,
            pages,
            charts_embedded,
        } => {
            println!(
                "PDF generated successfully at: {} ({} page{})",
                path.display(),
                pages,
                if *pages == 1 { "" } else { "s" }
            );
            if !charts_embedded {
                println!("Charts could not be generated; the report contains a placeholder instead.");
            }
        }
    }
}
