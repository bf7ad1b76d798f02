//! Estimator trait shared by regressors, pipelines and search wrappers

use super::metrics::r2_score;
use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2};

/// Fit / predict / score contract
pub trait Regressor: Send + Sync {
    /// Fit the estimator to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Number of input columns seen during fit, `None` before fitting
    fn n_features(&self) -> Option<usize>;

    /// R² of the predictions on `x` against `y`
    fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        r2_score(y, &y_pred)
    }
}

/// Reject targets whose length does not match the feature rows
pub(crate) fn check_xy(x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
    if x.nrows() != y.len() {
        return Err(WeatherError::ShapeError {
            expected: format!("y length = {}", x.nrows()),
            actual: format!("y length = {}", y.len()),
        });
    }
    if x.nrows() == 0 {
        return Err(WeatherError::ValidationError(
            "Cannot fit on zero samples".to_string(),
        ));
    }
    Ok(())
}

/// Reject prediction input whose width differs from the training width
pub(crate) fn check_width(expected: usize, x: &Array2<f64>) -> Result<()> {
    if x.ncols() != expected {
        return Err(WeatherError::ShapeError {
            expected: format!("{} columns", expected),
            actual: format!("{} columns", x.ncols()),
        });
    }
    Ok(())
}
