//! Feature standardization

use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix2};
use serde::{Deserialize, Serialize};

/// Z-score scaler: `(x - mean) / std`, column-wise.
///
/// Uses the population standard deviation. Constant columns keep a scale of
/// 1.0 so they transform to zero instead of NaN.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    /// Create an unfitted scaler
    pub fn new() -> Self {
        Self::default()
    }

    /// Learn per-column mean and standard deviation
    pub fn fit<S: Data<Elem = f64>>(&mut self, x: &ArrayBase<S, Ix2>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(WeatherError::ValidationError(
                "Cannot fit scaler on zero samples".to_string(),
            ));
        }

        let mean = x
            .mean_axis(Axis(0))
            .ok_or_else(|| WeatherError::ComputationError("Column mean undefined".to_string()))?;
        let scale = x
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        self.mean = Some(mean);
        self.scale = Some(scale);
        Ok(self)
    }

    /// Standardize `x` with the fitted statistics
    pub fn transform<S: Data<Elem = f64>>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>> {
        let (mean, scale) = self.params()?;
        self.check_width(x.ncols())?;
        Ok((x - &mean.view().insert_axis(Axis(0))) / &scale.view().insert_axis(Axis(0)))
    }

    /// Fit and transform in one step
    pub fn fit_transform<S: Data<Elem = f64>>(&mut self, x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }

    /// Map standardized values back to the original units
    pub fn inverse_transform<S: Data<Elem = f64>>(&self, x: &ArrayBase<S, Ix2>) -> Result<Array2<f64>> {
        let (mean, scale) = self.params()?;
        self.check_width(x.ncols())?;
        Ok(x * &scale.view().insert_axis(Axis(0)) + &mean.view().insert_axis(Axis(0)))
    }

    /// Fitted column means
    pub fn mean(&self) -> Option<&Array1<f64>> {
        self.mean.as_ref()
    }

    /// Fitted column scales
    pub fn scale(&self) -> Option<&Array1<f64>> {
        self.scale.as_ref()
    }

    /// Number of columns seen during fit
    pub fn n_features(&self) -> Option<usize> {
        self.mean.as_ref().map(|m| m.len())
    }

    fn params(&self) -> Result<(&Array1<f64>, &Array1<f64>)> {
        match (&self.mean, &self.scale) {
            (Some(mean), Some(scale)) => Ok((mean, scale)),
            _ => Err(WeatherError::ModelNotFitted),
        }
    }

    fn check_width(&self, n_cols: usize) -> Result<()> {
        let expected = self.n_features().unwrap_or(0);
        if n_cols != expected {
            return Err(WeatherError::ShapeError {
                expected: format!("{} columns", expected),
                actual: format!("{} columns", n_cols),
            });
        }
        Ok(())
    }
}
