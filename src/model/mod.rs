//! Model module - Prediction inputs and results

mod input;
mod result;

pub use input::{label_for, FormFields, PredictionInput};
pub use result::PredictionResult;
