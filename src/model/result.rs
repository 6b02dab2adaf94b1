//! Prediction Result Module

use serde::Deserialize;

/// A successful projection as returned by the prediction service.
///
/// Every number shown in the result panel, plotted on the chart, or written to
/// the report comes from one of these fields. Nothing downstream recomputes them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PredictionResult {
    pub prediction_count: f64,
    pub formatted_count: String,
    pub lower_bound: String,
    pub upper_bound: String,
    pub moores_comp: String,
    pub prediction_log: f64,
    /// Moore's Law projection for the same year, when the service supplies it.
    #[serde(default)]
    pub moores_val: Option<f64>,
}

impl PredictionResult {
    /// Confidence interval as shown in the result panel.
    pub fn interval_text(&self) -> String {
        format!("{} - {}", self.lower_bound, self.upper_bound)
    }
}
