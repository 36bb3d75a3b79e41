// ─────────────────────────────────────────────────────────────────────────────
// BMI classification
// ─────────────────────────────────────────────────────────────────────────────

/// Upper bound (exclusive) of the Underweight band.
pub const UNDERWEIGHT_UPPER: f64 = 18.5;

/// Upper bound (exclusive) of the Normal band.
pub const NORMAL_UPPER: f64 = 25.0;

/// Upper bound (exclusive) of the Overweight band. Everything at or above is Obese.
pub const OVERWEIGHT_UPPER: f64 = 30.0;

/// Visible value range of the BMI chart.
pub const BMI_AXIS_MIN: f64 = 10.0;
pub const BMI_AXIS_MAX: f64 = 40.0;

/// Band colours, Underweight through Obese.
pub const BAND_COLORS: [&str; 4] = ["#3498db", "#2ecc71", "#f39c12", "#e74c3c"];

// ─────────────────────────────────────────────────────────────────────────────
// Macronutrients
// ─────────────────────────────────────────────────────────────────────────────

/// Energy density of carbohydrate (kcal per gram).
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;

/// Energy density of protein (kcal per gram).
pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

/// Energy density of fat (kcal per gram).
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

/// Daily calories used when none are given.
pub const DEFAULT_CALORIES: f64 = 2000.0;

/// Default macro split in percent.
pub const DEFAULT_CARBS_PCT: f64 = 50.0;
pub const DEFAULT_PROTEIN_PCT: f64 = 30.0;
pub const DEFAULT_FAT_PCT: f64 = 20.0;

/// How far a macro split may drift from 100% and still be accepted.
pub const PERCENT_SUM_TOLERANCE: f64 = 0.5;

/// Macro category colours: carbs, protein, fat.
pub const MACRO_COLORS: [&str; 3] = ["#636EFA", "#EF553B", "#00CC96"];

/// Parse a `#rrggbb` colour into its components.
///
/// Unparseable input yields black.
pub fn hex_rgb(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return (0, 0, 0);
    }
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or(0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_rgb() {
        assert_eq!(hex_rgb("#3498db"), (0x34, 0x98, 0xdb));
        assert_eq!(hex_rgb("636EFA"), (0x63, 0x6e, 0xfa));
        assert_eq!(hex_rgb("#bad"), (0, 0, 0));
    }
}
