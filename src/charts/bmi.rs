use crate::health::{BmiBand, BmiResult, BMI_AXIS_MAX, BMI_AXIS_MIN};

/// One stacked band of the BMI bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BandSegment {
    pub band: BmiBand,
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

impl BandSegment {
    /// Segment bounds clipped to the visible axis.
    pub fn visible_span(&self) -> (f64, f64) {
        (
            self.start.clamp(BMI_AXIS_MIN, BMI_AXIS_MAX),
            self.end.clamp(BMI_AXIS_MIN, BMI_AXIS_MAX),
        )
    }

    /// Where the band name is drawn: the middle of the visible part.
    pub fn label_position(&self) -> f64 {
        let (lo, hi) = self.visible_span();
        lo + (hi - lo) / 2.0
    }
}

/// Marker placed at the user's BMI.
#[derive(Debug, Clone, PartialEq)]
pub struct BmiMarker {
    /// Position on the axis, kept inside the visible range.
    pub position: f64,
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BmiChart {
    pub title: String,
    pub result: BmiResult,
    pub axis: (f64, f64),
    pub segments: Vec<BandSegment>,
    pub marker: BmiMarker,
}

/// Stacked-band BMI chart over [10, 40] with a marker at the computed value.
pub fn build_bmi_chart(weight_kg: f64, height_cm: f64) -> BmiChart {
    let result = BmiResult::from_measurements(weight_kg, height_cm);
    let band = result.band;

    let segments = BmiBand::ALL
        .iter()
        .map(|b| {
            let (start, end) = b.chart_span();
            BandSegment {
                band: *b,
                start,
                end,
                color: b.color(),
            }
        })
        .collect();

    let position = if result.value.is_finite() {
        result.value.clamp(BMI_AXIS_MIN, BMI_AXIS_MAX)
    } else {
        BMI_AXIS_MAX
    };

    BmiChart {
        title: format!("BMI Classification - {}", band.range_label()),
        result,
        axis: (BMI_AXIS_MIN, BMI_AXIS_MAX),
        segments,
        marker: BmiMarker {
            position,
            label: format!("Your BMI: {:.1} ({})", result.value, band.range_label()),
            color: band.color(),
        },
    }
}
