//! Report Exporter Module
//! Lays out the prediction report and saves it as a PDF.

use crate::model::{label_for, PredictionInput, PredictionResult};
use crate::report::pdf::{DrawCall, PdfDocument, Rgb, TextAlign, PAGE_WIDTH_MM};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const REPORT_TITLE: &str = "Transistor Count Prediction Report";
pub const REPORT_FOOTER: &str = "Generated by Silicon Scaling Projector";
pub const DEFAULT_REPORT_NAME: &str = "prediction_report.pdf";

const ACCENT: Rgb = Rgb(0, 188, 212);
const RESULT_GREEN: Rgb = Rgb(0, 150, 0);
const BODY_GRAY: Rgb = Rgb::gray(60);

/// Margins and rules (mm)
const LEFT: f64 = 20.0;
const INDENT: f64 = 25.0;
const RIGHT: f64 = 190.0;
const FOOTER_Y: f64 = 280.0;
/// Lowest baseline for body text before breaking to a new page
const BODY_LIMIT_Y: f64 = 265.0;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds prediction reports. Pure formatting: nothing here is recomputed.
pub struct ReportExporter;

/// Accumulates draw calls and tracks the running baseline.
struct Layout {
    calls: Vec<DrawCall>,
    y: f64,
}

impl Layout {
    fn push(&mut self, call: DrawCall) {
        self.calls.push(call);
    }

    fn text(&mut self, text: impl Into<String>, x: f64, y: f64, align: TextAlign) {
        self.push(DrawCall::Text {
            text: text.into(),
            x,
            y,
            align,
        });
    }

    fn rule(&mut self, y: f64) {
        self.push(DrawCall::Line {
            x1: LEFT,
            y1: y,
            x2: RIGHT,
            y2: y,
        });
    }

    /// Move the baseline down, starting a new page if it runs off the body area.
    fn advance(&mut self, step: f64) {
        self.y += step;
        if self.y > BODY_LIMIT_Y {
            self.push(DrawCall::NewPage);
            self.y = 20.0;
        }
    }
}

impl ReportExporter {
    /// Ordered draw calls for the report.
    pub fn layout(
        result: &PredictionResult,
        input: &PredictionInput,
        generated_on: &str,
    ) -> Vec<DrawCall> {
        let center = PAGE_WIDTH_MM / 2.0;
        let mut page = Layout {
            calls: Vec::new(),
            y: 0.0,
        };

        // Title block
        page.push(DrawCall::FontSize(20.0));
        page.push(DrawCall::TextColor(ACCENT));
        page.text(REPORT_TITLE, center, 20.0, TextAlign::Center);

        page.push(DrawCall::FontSize(10.0));
        page.push(DrawCall::TextColor(Rgb::gray(100)));
        page.text(
            format!("Generated on: {generated_on}"),
            center,
            30.0,
            TextAlign::Center,
        );

        // Inputs
        page.push(DrawCall::DrawColor(Rgb::BLACK));
        page.rule(35.0);
        page.push(DrawCall::FontSize(14.0));
        page.push(DrawCall::TextColor(Rgb::BLACK));
        page.text("Model Inputs:", LEFT, 45.0, TextAlign::Left);

        page.push(DrawCall::FontSize(12.0));
        page.push(DrawCall::TextColor(BODY_GRAY));
        page.y = 55.0;
        for (key, value) in input.entries() {
            let y = page.y;
            page.text(format!("- {}: {}", label_for(key), value), INDENT, y, TextAlign::Left);
            page.advance(8.0);
        }

        // Results
        page.advance(10.0);
        let y = page.y;
        page.rule(y);
        page.advance(10.0);
        page.push(DrawCall::FontSize(14.0));
        page.push(DrawCall::TextColor(Rgb::BLACK));
        let y = page.y;
        page.text("Projection Results:", LEFT, y, TextAlign::Left);

        page.advance(15.0);
        page.push(DrawCall::FontSize(16.0));
        page.push(DrawCall::TextColor(RESULT_GREEN));
        let y = page.y;
        page.text(
            format!("Predicted Count: {}", result.formatted_count),
            INDENT,
            y,
            TextAlign::Left,
        );

        page.advance(10.0);
        page.push(DrawCall::FontSize(12.0));
        page.push(DrawCall::TextColor(BODY_GRAY));
        let lines = [
            format!(
                "Confidence Interval (20%): {} to {}",
                result.lower_bound, result.upper_bound
            ),
            format!("Moore's Law Comparison: {}", result.moores_comp),
            format!("Log10 Value: {}", result.prediction_log),
        ];
        for (i, line) in lines.into_iter().enumerate() {
            if i > 0 {
                page.advance(8.0);
            }
            let y = page.y;
            page.text(line, INDENT, y, TextAlign::Left);
        }

        // Footer
        page.push(DrawCall::FontSize(10.0));
        page.push(DrawCall::TextColor(Rgb::gray(150)));
        page.text(REPORT_FOOTER, center, FOOTER_Y, TextAlign::Center);

        page.calls
    }

    /// Render the report stamped with the current local time and write it to `path`.
    pub fn export(
        result: &PredictionResult,
        input: &PredictionInput,
        path: &Path,
    ) -> Result<PathBuf, ReportError> {
        let generated_on = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let doc = PdfDocument::from_calls(&Self::layout(result, input, &generated_on));
        fs::write(path, doc.to_bytes())?;
        info!(path = %path.display(), pages = doc.page_count(), "Report saved");
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (PredictionResult, PredictionInput) {
        (
            PredictionResult {
                prediction_count: 1.2e11,
                formatted_count: "120.0 Billion".into(),
                lower_bound: "96.0B".into(),
                upper_bound: "144.0B".into(),
                moores_comp: "2.1x ahead of trend".into(),
                prediction_log: 11.08,
                moores_val: None,
            },
            PredictionInput {
                year: "2030".into(),
                node_size: 2.0,
                area: "100".into(),
                trans_density: "250".into(),
                power_density: "50".into(),
            },
        )
    }

    fn texts(calls: &[DrawCall]) -> Vec<&str> {
        calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn content_follows_fixed_order() {
        let (result, input) = sample();
        let calls = ReportExporter::layout(&result, &input, "2026-01-01 09:00:00");
        assert_eq!(
            texts(&calls),
            vec![
                REPORT_TITLE,
                "Generated on: 2026-01-01 09:00:00",
                "Model Inputs:",
                "- Target Year: 2030",
                "- Node Size (nm): 2",
                "- Die Area (mm2): 100",
                "- Transistor Density (tr/mm2): 250",
                "- Power Density (W/cm2): 50",
                "Projection Results:",
                "Predicted Count: 120.0 Billion",
                "Confidence Interval (20%): 96.0B to 144.0B",
                "Moore's Law Comparison: 2.1x ahead of trend",
                "Log10 Value: 11.08",
                REPORT_FOOTER,
            ]
        );
    }

    #[test]
    fn results_block_sits_below_inputs() {
        let (result, input) = sample();
        let calls = ReportExporter::layout(&result, &input, "now");
        let y_of = |needle: &str| {
            calls
                .iter()
                .find_map(|c| match c {
                    DrawCall::Text { text, y, .. } if text.starts_with(needle) => Some(*y),
                    _ => None,
                })
                .unwrap()
        };
        assert_eq!(y_of("- Target Year"), 55.0);
        assert_eq!(y_of("- Power Density"), 87.0);
        assert_eq!(y_of("Projection Results"), 115.0);
        assert_eq!(y_of("Predicted Count"), 130.0);
        assert_eq!(y_of("Log10 Value"), 156.0);
        assert!(!calls.contains(&DrawCall::NewPage));
    }

    #[test]
    fn export_writes_pdf_file() {
        let (result, input) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_NAME);

        let saved = ReportExporter::export(&result, &input, &path).unwrap();
        assert_eq!(saved, path);

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("(- Target Year: 2030) Tj"));
        assert!(text.contains("(Predicted Count: 120.0 Billion) Tj"));
        assert!(text.contains("(Log10 Value: 11.08) Tj"));
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let (result, input) = sample();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(DEFAULT_REPORT_NAME);
        assert!(matches!(
            ReportExporter::export(&result, &input, &path),
            Err(ReportError::Io(_))
        ));
    }
}
