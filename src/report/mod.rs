mod exporter;
mod pdf;

pub use exporter::{
    export_report, export_report_with, with_report_extension, DestinationPicker, ExportOutcome,
    REPORT_EXTENSION,
};
pub use pdf::{build_report_pdf, ReportContent, ReportImage, CHARTS_PLACEHOLDER};
