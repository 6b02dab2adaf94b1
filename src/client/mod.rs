//! Client module - Remote prediction service

mod http;

pub use http::HttpPredictionClient;

use crate::model::{PredictionInput, PredictionResult};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    /// The service answered with `status: "error"`.
    #[error("{0}")]
    Rejected(String),
    /// No well-formed answer arrived.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Anything that can turn an input into a projection.
///
/// One call is one attempt. Implementations must not retry.
pub trait PredictionService: Send + Sync {
    fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, PredictError>;
}
