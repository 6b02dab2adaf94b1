//! Report module - PDF prediction reports

mod exporter;
mod pdf;

pub use exporter::{ReportError, ReportExporter, DEFAULT_REPORT_NAME};
