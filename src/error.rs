//! Error types for weather prediction and visualization

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, WeatherError>;

/// Main error type
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid shape: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("Invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Computation error: {0}")]
    ComputationError(String),

    #[error("Thread pool error: {0}")]
    ThreadPoolError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<ndarray::ShapeError> for WeatherError {
    fn from(err: ndarray::ShapeError) -> Self {
        WeatherError::ShapeError {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

impl From<rayon::ThreadPoolBuildError> for WeatherError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        WeatherError::ThreadPoolError(err.to_string())
    }
}
