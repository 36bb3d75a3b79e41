use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::charts::{render_png, BmiChart, Chart, MacroChart};
use crate::error::{DietError, Result};
use crate::models::{DietPlan, UserProfile};
use crate::report::pdf::{build_report_pdf, ReportContent, ReportImage};

pub const REPORT_EXTENSION: &str = "pdf";

/// Asks where the report should go. `None` means the user canceled.
pub trait DestinationPicker {
    fn pick_destination(&mut self) -> Result<Option<PathBuf>>;
}

impl<F> DestinationPicker for F
where
    F: FnMut() -> Result<Option<PathBuf>>,
{
    fn pick_destination(&mut self) -> Result<Option<PathBuf>> {
        self()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Canceled,
    Saved {
        path: PathBuf,
        pages: usize,
        /// False when the charts were replaced by a placeholder.
        charts_embedded: bool,
    },
}

/// Export the plan and both charts as a PDF.
///
/// Chart failures are logged and replaced with a placeholder paragraph;
/// only a failure to build or write the document itself is returned.
pub fn export_report(
    profile: &UserProfile,
    plan: &DietPlan,
    bmi_chart: &BmiChart,
    macro_chart: &MacroChart,
    picker: &mut dyn DestinationPicker,
) -> Result<ExportOutcome> {
    export_report_with(profile, plan, bmi_chart, macro_chart, picker, render_png)
}

/// [`export_report`] with the chart renderer supplied by the caller.
pub fn export_report_with<R>(
    profile: &UserProfile,
    plan: &DietPlan,
    bmi_chart: &BmiChart,
    macro_chart: &MacroChart,
    picker: &mut dyn DestinationPicker,
    render: R,
) -> Result<ExportOutcome>
where
    R: Fn(&Chart, &Path) -> Result<()>,
{
    if plan.is_blank() {
        return Err(DietError::validation("Please generate a diet plan first"));
    }

    let Some(path) = picker.pick_destination()? else {
        info!("Report export canceled");
        return Ok(ExportOutcome::Canceled);
    };
    let path = with_report_extension(path);

    let (charts, charts_complete) = render_chart_images(bmi_chart, macro_chart, &render);

    let (bytes, pages) = build_report_pdf(ReportContent {
        profile,
        plan,
        charts,
        charts_complete,
    })?;
    fs::write(&path, bytes)?;

    info!(path = %path.display(), pages, charts_embedded = charts_complete, "Report saved");
    Ok(ExportOutcome::Saved {
        path,
        pages,
        charts_embedded: charts_complete,
    })
}

/// Render the charts in order into a fresh temporary directory and load them
/// back as PDF images. Stops at the first failure, keeping the images that
/// were already loaded; the flag tells whether every chart made it.
fn render_chart_images<R>(
    bmi_chart: &BmiChart,
    macro_chart: &MacroChart,
    render: &R,
) -> (Vec<ReportImage>, bool)
where
    R: Fn(&Chart, &Path) -> Result<()>,
{
    let dir = match tempfile::Builder::new().prefix("diet_buddy_").tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            warn!(error = %e, "Error adding charts to PDF");
            return (Vec::new(), false);
        }
    };

    let sections = [
        ("BMI Analysis:", Chart::from(bmi_chart.clone())),
        ("Recommended Macronutrients:", Chart::from(macro_chart.clone())),
    ];

    let mut images = Vec::with_capacity(sections.len());
    for (heading, chart) in &sections {
        let path = dir.path().join(chart.file_name());
        match render(chart, &path).and_then(|()| ReportImage::load(*heading, &path)) {
            Ok(image) => images.push(image),
            Err(e) => {
                warn!(chart = chart.title(), error = %e, "Error adding charts to PDF");
                return (images, false);
            }
        }
    }
    (images, true)
}

/// Append `.pdf` unless the path already ends in it.
pub fn with_report_extension(path: PathBuf) -> PathBuf {
    let has_ext = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(REPORT_EXTENSION));
    if has_ext {
        return path;
    }
    let mut name = path.into_os_string();
    name.push(".");
    name.push(REPORT_EXTENSION);
    PathBuf::from(name)
}
