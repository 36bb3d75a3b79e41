use std::f64::consts::PI;

use crate::health::{MacroSplit, MACRO_COLORS};

/// Points per full turn when approximating arcs.
const ARC_STEPS: usize = 120;

/// One macro category in both views.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroSlice {
    pub label: &'static str,
    pub percent: f64,
    pub grams: f64,
    pub color: &'static str,
}

impl MacroSlice {
    pub fn grams_label(&self) -> String {
        format!("{:.1}g", self.grams)
    }

    pub fn percent_label(&self) -> String {
        format!("{} {:.0}%", self.label, self.percent)
    }
}

/// Proportion view (donut) next to a gram-amount view (bars).
#[derive(Debug, Clone, PartialEq)]
pub struct MacroChart {
    pub title: String,
    pub split: MacroSplit,
    pub slices: Vec<MacroSlice>,
}

pub fn build_macro_chart(split: &MacroSplit) -> MacroChart {
    let grams = split.grams();
    let rows = [
        ("Carbs", split.carbs_pct, grams.carbs),
        ("Protein", split.protein_pct, grams.protein),
        ("Fat", split.fat_pct, grams.fat),
    ];

    let slices = rows
        .into_iter()
        .zip(MACRO_COLORS)
        .map(|((label, percent, grams), color)| MacroSlice {
            label,
            percent,
            grams,
            color,
        })
        .collect();

    MacroChart {
        title: "Macronutrient Distribution".to_string(),
        split: *split,
        slices,
    }
}

impl MacroChart {
    /// Largest gram amount, for scaling the bar view.
    pub fn max_grams(&self) -> f64 {
        self.slices.iter().map(|s| s.grams).fold(0.0, f64::max)
    }

    /// Angular extent of each slice in radians, starting at 12 o'clock and
    /// running clockwise.
    pub fn slice_angles(&self) -> Vec<(f64, f64)> {
        let total: f64 = self.slices.iter().map(|s| s.percent).sum();
        if total <= 0.0 {
            return vec![(0.0, 0.0); self.slices.len()];
        }

        let mut start = 0.0;
        self.slices
            .iter()
            .map(|s| {
                let end = start + s.percent / total * 2.0 * PI;
                let span = (start, end);
                start = end;
                span
            })
            .collect()
    }

    /// Ring-segment outline for every slice on a unit circle.
    pub fn wedges(&self, inner_radius: f64) -> Vec<Vec<(f64, f64)>> {
        self.slice_angles()
            .into_iter()
            .map(|(start, end)| ring_segment(start, end, inner_radius, 1.0))
            .collect()
    }
}

/// Point on a circle, angle measured clockwise from 12 o'clock.
pub(crate) fn polar(angle: f64, radius: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

fn ring_segment(start: f64, end: f64, inner: f64, outer: f64) -> Vec<(f64, f64)> {
    if end <= start {
        return Vec::new();
    }
    let steps = (((end - start) / (2.0 * PI)) * ARC_STEPS as f64).ceil().max(1.0) as usize;
    let step = (end - start) / steps as f64;

    let mut points: Vec<(f64, f64)> = (0..=steps)
        .map(|i| polar(start + step * i as f64, outer))
        .collect();
    points.extend((0..=steps).rev().map(|i| polar(start + step * i as f64, inner)));
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_grams() {
        let chart = build_macro_chart(&MacroSplit::default());
        let labels: Vec<String> = chart.slices.iter().map(|s| s.grams_label()).collect();
        assert_eq!(labels, vec!["250.0g", "150.0g", "44.4g"]);
        assert_eq!(chart.slices[0].percent_label(), "Carbs 50%");
        assert_eq!(chart.max_grams(), 250.0);
    }

    #[test]
    fn test_slice_angles_cover_full_turn() {
        let chart = build_macro_chart(&MacroSplit::default());
        let angles = chart.slice_angles();
        assert_eq!(angles[0].0, 0.0);
        assert!((angles[2].1 - 2.0 * PI).abs() < 1e-9);
        assert!((angles[0].1 - PI).abs() < 1e-9);
    }

    #[test]
    fn test_empty_slice_has_no_wedge() {
        let split = MacroSplit::new(1800.0, 60.0, 40.0, 0.0).unwrap();
        let wedges = build_macro_chart(&split).wedges(0.4);
        assert!(!wedges[0].is_empty());
        assert!(wedges[2].is_empty());
    }
}
