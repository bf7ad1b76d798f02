//! Prediction on current weather conditions

use crate::error::{Result, WeatherError};
use crate::training::Regressor;
use ndarray::{Array1, Array2};
use std::time::Instant;
use tracing::debug;

/// Predict one value per row of `current_data`, in row order.
///
/// `current_data` must have the column layout the model was trained on.
/// Models that were never fitted report [`WeatherError::ModelNotFitted`].
pub fn predict_future<M>(model: &M, current_data: &Array2<f64>) -> Result<Array1<f64>>
where
    M: Regressor + ?Sized,
{
    let n_features = model.n_features().ok_or(WeatherError::ModelNotFitted)?;
    if current_data.ncols() != n_features {
        return Err(WeatherError::ShapeError {
            expected: format!("{} columns", n_features),
            actual: format!("{} columns", current_data.ncols()),
        });
    }

    let start = Instant::now();
    let predictions = model.predict(current_data)?;
    debug!(
        n_rows = current_data.nrows(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Predicted future conditions"
    );

    Ok(predictions)
}
