//! Standardization + regressor pipeline

use super::models::Regressor;
use crate::error::{Result, WeatherError};
use crate::preprocessing::StandardScaler;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Two-stage estimator: features are standardized with statistics learned
/// on the fit data, then passed to the regressor. Fit and applied as one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pipeline<R> {
    scaler: StandardScaler,
    regressor: R,
    is_fitted: bool,
}

impl<R: Regressor> Pipeline<R> {
    pub fn new(regressor: R) -> Self {
        Self {
            scaler: StandardScaler::new(),
            regressor,
            is_fitted: false,
        }
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}

impl<R: Regressor> Regressor for Pipeline<R> {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.is_fitted = false;
        let x_scaled = self.scaler.fit_transform(x)?;
        self.regressor.fit(&x_scaled, y)?;
        self.is_fitted = true;
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        if !self.is_fitted {
            return Err(WeatherError::ModelNotFitted);
        }
        let x_scaled = self.scaler.transform(x)?;
        self.regressor.predict(&x_scaled)
    }

    fn n_features(&self) -> Option<usize> {
        if self.is_fitted {
            self.scaler.n_features()
        } else {
            None
        }
    }
}
