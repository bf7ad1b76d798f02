//! Regression metrics

use crate::error::{Result, WeatherError};
use ndarray::{ArrayBase, Data, Ix1};
use serde::{Deserialize, Serialize};

fn check_lengths<S1, S2>(y_true: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<()>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    if y_true.len() != y_pred.len() {
        return Err(WeatherError::ShapeError {
            expected: format!("y_pred length = {}", y_true.len()),
            actual: format!("y_pred length = {}", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(WeatherError::ValidationError(
            "Cannot score an empty target vector".to_string(),
        ));
    }
    Ok(())
}

/// Coefficient of determination.
///
/// A constant target scores 1.0 when predicted exactly and 0.0 otherwise.
pub fn r2_score<S1, S2>(y_true: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(y_true, y_pred)?;

    let y_mean = y_true.sum() / y_true.len() as f64;
    let ss_res: f64 = y_true.iter().zip(y_pred.iter()).map(|(t, p)| (t - p).powi(2)).sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }
    Ok(1.0 - ss_res / ss_tot)
}

pub fn mean_squared_error<S1, S2>(y_true: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(y_true, y_pred)?;
    let sum: f64 = y_true.iter().zip(y_pred.iter()).map(|(t, p)| (t - p).powi(2)).sum();
    Ok(sum / y_true.len() as f64)
}

pub fn mean_absolute_error<S1, S2>(y_true: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<f64>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
{
    check_lengths(y_true, y_pred)?;
    let sum: f64 = y_true.iter().zip(y_pred.iter()).map(|(t, p)| (t - p).abs()).sum();
    Ok(sum / y_true.len() as f64)
}

/// Summary of regression quality on one partition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub r2: f64,
    pub mse: f64,
    pub rmse: f64,
    pub mae: f64,
    pub n_samples: usize,
}

impl RegressionMetrics {
    /// Compute all regression metrics at once
    pub fn compute<S1, S2>(y_true: &ArrayBase<S1, Ix1>, y_pred: &ArrayBase<S2, Ix1>) -> Result<Self>
    where
        S1: Data<Elem = f64>,
        S2: Data<Elem = f64>,
    {
        let mse = mean_squared_error(y_true, y_pred)?;
        Ok(Self {
            r2: r2_score(y_true, y_pred)?,
            mse,
            rmse: mse.sqrt(),
            mae: mean_absolute_error(y_true, y_pred)?,
            n_samples: y_true.len(),
        })
    }
}
