//! Inference module
//!
//! Applies a trained model to current weather conditions.

mod predictor;

pub use predictor::predict_future;
