//! Chart descriptions and their PNG rendering.
//!
//! Building a chart is pure; only [`render_png`] touches the filesystem.

mod bmi;
mod macros;
mod render;

pub use bmi::{build_bmi_chart, BandSegment, BmiChart, BmiMarker};
pub use macros::{build_macro_chart, MacroChart, MacroSlice};
pub use render::{render_png, CHART_SIZE};

/// Either of the two charts the application draws.
#[derive(Debug, Clone, PartialEq)]
pub enum Chart {
    Bmi(BmiChart),
    Macro(MacroChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Bmi(c) => &c.title,
            Chart::Macro(c) => &c.title,
        }
    }

    /// File name used when the chart is written out.
    pub fn file_name(&self) -> &'static str {
        match self {
            Chart::Bmi(_) => "bmi_chart.png",
            Chart::Macro(_) => "macro_chart.png",
        }
    }
}

impl From<BmiChart> for Chart {
    fn from(chart: BmiChart) -> Self {
        Chart::Bmi(chart)
    }
}

impl From<MacroChart> for Chart {
    fn from(chart: MacroChart) -> Self {
        Chart::Macro(chart)
    }
}
