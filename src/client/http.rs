//! HTTP Prediction Client
//! Posts the input as JSON and normalizes the reply into a result or a typed failure.

use crate::client::{PredictError, PredictionService};
use crate::model::{PredictionInput, PredictionResult};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Wire shape of a reply. Anything else is a transport failure.
#[derive(Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum WireResponse {
    Success(PredictionResult),
    Error { message: String },
}

/// Blocking client for the remote `/predict` endpoint.
pub struct HttpPredictionClient {
    client: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    /// Build a client for `endpoint`. No request timeout is applied.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PredictError> {
        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PredictionService for HttpPredictionClient {
    fn predict(&self, input: &PredictionInput) -> Result<PredictionResult, PredictError> {
        debug!(endpoint = %self.endpoint, ?input, "POST prediction request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(input)
            .send()
            .map_err(|e| PredictError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Prediction service returned non-success status");
            return Err(PredictError::Transport(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| PredictError::Transport(e.to_string()))?;
        debug!(%body, "Prediction response body");

        parse_response(&body)
    }
}

/// Normalize a response body.
pub fn parse_response(body: &str) -> Result<PredictionResult, PredictError> {
    match serde_json::from_str::<WireResponse>(body) {
        Ok(WireResponse::Success(result)) => Ok(result),
        Ok(WireResponse::Error { message }) => Err(PredictError::Rejected(message)),
        Err(e) => Err(PredictError::Transport(format!("unexpected response: {e}"))),
    }
}
