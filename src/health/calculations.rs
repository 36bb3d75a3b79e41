use std::fmt;

use crate::error::{DietError, Result};
use crate::health::constants::{
    BAND_COLORS, DEFAULT_CALORIES, DEFAULT_CARBS_PCT, DEFAULT_FAT_PCT, DEFAULT_PROTEIN_PCT,
    KCAL_PER_GRAM_CARBS, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN, NORMAL_UPPER,
    OVERWEIGHT_UPPER, PERCENT_SUM_TOLERANCE, UNDERWEIGHT_UPPER,
};

/// One of the four contiguous BMI bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiBand {
    /// All bands in ascending order.
    pub const ALL: [BmiBand; 4] = [
        BmiBand::Underweight,
        BmiBand::Normal,
        BmiBand::Overweight,
        BmiBand::Obese,
    ];

    /// Classify a BMI value. Lower bounds are inclusive.
    pub fn classify(bmi: f64) -> Self {
        if bmi < UNDERWEIGHT_UPPER {
            BmiBand::Underweight
        } else if bmi < NORMAL_UPPER {
            BmiBand::Normal
        } else if bmi < OVERWEIGHT_UPPER {
            BmiBand::Overweight
        } else {
            BmiBand::Obese
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BmiBand::Underweight => "Underweight",
            BmiBand::Normal => "Normal",
            BmiBand::Overweight => "Overweight",
            BmiBand::Obese => "Obese",
        }
    }

    /// Name with the numeric range, as shown on the chart.
    pub fn range_label(self) -> &'static str {
        match self {
            BmiBand::Underweight => "Underweight (<18.5)",
            BmiBand::Normal => "Normal (18.5-24.9)",
            BmiBand::Overweight => "Overweight (25-29.9)",
            BmiBand::Obese => "Obese (>=30)",
        }
    }

    pub fn suggested_goal(self) -> &'static str {
        match self {
            BmiBand::Underweight => "gain weight",
            BmiBand::Normal => "maintain weight",
            BmiBand::Overweight | BmiBand::Obese => "lose weight",
        }
    }

    /// Status line handed to the plan generator.
    pub fn status_label(self) -> String {
        format!("{} (suggested goal: {})", self.name(), self.suggested_goal())
    }

    pub fn color(self) -> &'static str {
        BAND_COLORS[self.index()]
    }

    /// Lower and upper bound of the band as drawn on the chart.
    pub fn chart_span(self) -> (f64, f64) {
        match self {
            BmiBand::Underweight => (0.0, UNDERWEIGHT_UPPER),
            BmiBand::Normal => (UNDERWEIGHT_UPPER, NORMAL_UPPER),
            BmiBand::Overweight => (NORMAL_UPPER, OVERWEIGHT_UPPER),
            BmiBand::Obese => (OVERWEIGHT_UPPER, OVERWEIGHT_UPPER + 10.0),
        }
    }

    fn index(self) -> usize {
        match self {
            BmiBand::Underweight => 0,
            BmiBand::Normal => 1,
            BmiBand::Overweight => 2,
            BmiBand::Obese => 3,
        }
    }
}

impl fmt::Display for BmiBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A computed body-mass index and its band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiResult {
    pub value: f64,
    pub band: BmiBand,
}

impl BmiResult {
    /// Compute BMI from weight in kg and height in cm.
    pub fn from_measurements(weight_kg: f64, height_cm: f64) -> Self {
        let value = calculate_bmi(weight_kg, height_cm);
        Self {
            value,
            band: BmiBand::classify(value),
        }
    }
}

impl fmt::Display for BmiResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} ({})", self.value, self.band)
    }
}

/// Body-mass index: weight / (height in metres)².
#[inline]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Percentage allocation of daily calories among the three macros.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroSplit {
    pub calories: f64,
    pub carbs_pct: f64,
    pub protein_pct: f64,
    pub fat_pct: f64,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIES,
            carbs_pct: DEFAULT_CARBS_PCT,
            protein_pct: DEFAULT_PROTEIN_PCT,
            fat_pct: DEFAULT_FAT_PCT,
        }
    }
}

impl MacroSplit {
    /// Build a split, rejecting non-positive calories and percentages that
    /// are negative or do not add up to 100.
    pub fn new(calories: f64, carbs_pct: f64, protein_pct: f64, fat_pct: f64) -> Result<Self> {
        if !calories.is_finite() || calories <= 0.0 {
            return Err(DietError::validation("Calories must be a positive number"));
        }
        let pcts = [carbs_pct, protein_pct, fat_pct];
        if pcts.iter().any(|p| !p.is_finite() || *p < 0.0) {
            return Err(DietError::validation(
                "Macro percentages must be non-negative numbers",
            ));
        }
        let sum: f64 = pcts.iter().sum();
        if (sum - 100.0).abs() > PERCENT_SUM_TOLERANCE {
            return Err(DietError::validation(format!(
                "Macro percentages must add up to 100 (got {:.1})",
                sum
            )));
        }
        Ok(Self {
            calories,
            carbs_pct,
            protein_pct,
            fat_pct,
        })
    }

    /// Convert the split to gram amounts.
    pub fn grams(&self) -> MacroGrams {
        MacroGrams {
            carbs: percent_to_grams(self.carbs_pct, self.calories, KCAL_PER_GRAM_CARBS),
            protein: percent_to_grams(self.protein_pct, self.calories, KCAL_PER_GRAM_PROTEIN),
            fat: percent_to_grams(self.fat_pct, self.calories, KCAL_PER_GRAM_FAT),
        }
    }
}

/// Gram amounts of each macro.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacroGrams {
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

impl MacroGrams {
    /// Energy represented by these grams.
    pub fn total_calories(&self) -> f64 {
        self.carbs * KCAL_PER_GRAM_CARBS
            + self.protein * KCAL_PER_GRAM_PROTEIN
            + self.fat * KCAL_PER_GRAM_FAT
    }
}

/// grams = percent/100 × calories / density
#[inline]
pub fn percent_to_grams(percent: f64, calories: f64, kcal_per_gram: f64) -> f64 {
    (percent / 100.0) * calories / kcal_per_gram
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive_below() {
        assert_eq!(BmiBand::classify(18.49), BmiBand::Underweight);
        assert_eq!(BmiBand::classify(18.5), BmiBand::Normal);
        assert_eq!(BmiBand::classify(24.99), BmiBand::Normal);
        assert_eq!(BmiBand::classify(25.0), BmiBand::Overweight);
        assert_eq!(BmiBand::classify(29.99), BmiBand::Overweight);
        assert_eq!(BmiBand::classify(30.0), BmiBand::Obese);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(
            BmiBand::Normal.status_label(),
            "Normal (suggested goal: maintain weight)"
        );
        assert_eq!(
            BmiBand::Obese.status_label(),
            "Obese (suggested goal: lose weight)"
        );
    }

    #[test]
    fn test_chart_spans_are_contiguous() {
        let spans: Vec<(f64, f64)> = BmiBand::ALL.iter().map(|b| b.chart_span()).collect();
        for pair in spans.windows(2) {
            assert_eq!(pair[0].1, pair[1].0);
        }
    }

    #[test]
    fn test_macro_split_rejects_bad_sum() {
        assert!(MacroSplit::new(2000.0, 50.0, 30.0, 30.0).is_err());
        assert!(MacroSplit::new(0.0, 50.0, 30.0, 20.0).is_err());
        assert!(MacroSplit::new(2000.0, -10.0, 90.0, 20.0).is_err());
        assert!(MacroSplit::new(2000.0, 40.0, 40.0, 20.0).is_ok());
    }

    #[test]
    fn test_default_split() {
        let split = MacroSplit::default();
        assert_eq!(split.calories, 2000.0);
        assert_eq!(split.carbs_pct + split.protein_pct + split.fat_pct, 100.0);
    }
}
