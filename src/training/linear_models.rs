//! Ordinary least squares regression

use super::models::{check_width, check_xy, Regressor};
use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Cholesky factor `L` of a symmetric positive-definite matrix (`A = L Lᵀ`).
fn cholesky(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    let mut l = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..=i {
            let mut sum = 0.0;
            for k in 0..j {
                sum += l[[i, k]] * l[[j, k]];
            }

            if i == j {
                let diag = a[[i, i]] - sum;
                if diag <= f64::EPSILON * n as f64 * a[[i, i]].abs() {
                    return None;
                }
                l[[i, j]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - sum) / l[[j, j]];
            }
        }
    }

    Some(l)
}

/// Solve `L Lᵀ x = b` by forward then backward substitution
fn cholesky_substitute(l: &Array2<f64>, b: &Array1<f64>) -> Array1<f64> {
    let n = l.nrows();

    let mut y = Array1::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..i {
            sum += l[[i, j]] * y[j];
        }
        y[i] = (b[i] - sum) / l[[i, i]];
    }

    let mut x = Array1::zeros(n);
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += l[[j, i]] * x[j];
        }
        x[i] = (y[i] - sum) / l[[i, i]];
    }

    x
}

/// Solve a symmetric positive semi-definite system.
///
/// Tries a plain Cholesky factorization first, then one retry with a small
/// ridge on the diagonal for near-singular systems (collinear or constant
/// features), then Gauss-Jordan elimination.
fn solve_symmetric(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    if let Some(l) = cholesky(a) {
        return Some(cholesky_substitute(&l, b));
    }

    let n = a.nrows();
    let trace: f64 = a.diag().iter().map(|v| v.abs()).sum();
    let ridge = 1e-8 * (trace / n as f64).max(f64::MIN_POSITIVE);
    let mut a_reg = a.clone();
    for k in 0..n {
        a_reg[[k, k]] += ridge;
    }
    if let Some(l) = cholesky(&a_reg) {
        return Some(cholesky_substitute(&l, b));
    }

    gauss_jordan_solve(a, b)
}

/// Gauss-Jordan elimination with partial pivoting
fn gauss_jordan_solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    let mut aug = Array2::zeros((n, n + 1));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.column_mut(n).assign(b);

    for col in 0..n {
        let pivot_row = (col..n).max_by(|&r1, &r2| {
            aug[[r1, col]]
                .abs()
                .partial_cmp(&aug[[r2, col]].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

        if aug[[pivot_row, col]].abs() < 1e-10 {
            return None;
        }
        if pivot_row != col {
            for j in 0..=n {
                aug.swap([col, j], [pivot_row, j]);
            }
        }

        let pivot = aug[[col, col]];
        aug.row_mut(col).mapv_inplace(|v| v / pivot);

        for row in 0..n {
            if row != col {
                let factor = aug[[row, col]];
                if factor != 0.0 {
                    for j in 0..=n {
                        aug[[row, j]] -= factor * aug[[col, j]];
                    }
                }
            }
        }
    }

    Some(aug.column(n).to_owned())
}

/// Linear regression fitted by ordinary least squares
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearRegression {
    /// Fitted coefficients (weights)
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept (bias)
    pub intercept: Option<f64>,
    /// Whether to fit intercept
    pub fit_intercept: bool,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercept: None,
            fit_intercept: true,
        }
    }

    /// Enable/disable fitting intercept
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_xy(x, y)?;

        // Centering removes the intercept from the normal equations
        let (x_centered, y_centered, x_mean, y_mean) = if self.fit_intercept {
            let x_mean = x
                .mean_axis(Axis(0))
                .ok_or_else(|| WeatherError::ComputationError("Feature mean undefined".to_string()))?;
            let y_mean = y.mean().unwrap_or(0.0);
            let x_centered = x - &x_mean.view().insert_axis(Axis(0));
            let y_centered = y - y_mean;
            (x_centered, y_centered, Some(x_mean), y_mean)
        } else {
            (x.clone(), y.clone(), None, 0.0)
        };

        // Normal equations: (XᵀX) w = Xᵀy
        let xtx = x_centered.t().dot(&x_centered);
        let xty = x_centered.t().dot(&y_centered);
        let coefficients = solve_symmetric(&xtx, &xty).ok_or_else(|| {
            WeatherError::ComputationError("Matrix is singular, cannot solve least squares".to_string())
        })?;

        if coefficients.iter().any(|c| !c.is_finite()) {
            return Err(WeatherError::ComputationError(
                "Least squares produced non-finite coefficients".to_string(),
            ));
        }

        let intercept = match x_mean {
            Some(x_mean) => y_mean - coefficients.dot(&x_mean),
            None => 0.0,
        };

        self.coefficients = Some(coefficients);
        self.intercept = Some(intercept);
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self.coefficients.as_ref().ok_or(WeatherError::ModelNotFitted)?;
        check_width(coefficients.len(), x)?;
        Ok(x.dot(coefficients) + self.intercept.unwrap_or(0.0))
    }

    fn n_features(&self) -> Option<usize> {
        self.coefficients.as_ref().map(|c| c.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_linear_regression_simple() {
        let x = array![
            [1.0, 1.0],
            [2.0, 1.0],
            [1.0, 2.0],
            [2.0, 2.0],
            [3.0, 1.0],
        ];
        // y = 2*x1 + 3*x2 + 1
        let y = array![6.0, 8.0, 9.0, 11.0, 10.0];

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let coef = model.coefficients.as_ref().unwrap();
        assert!((coef[0] - 2.0).abs() < 1e-8);
        assert!((coef[1] - 3.0).abs() < 1e-8);
        assert!((model.intercept.unwrap() - 1.0).abs() < 1e-8);

        let r2 = model.score(&x, &y).unwrap();
        assert!(r2 > 0.999_999, "R² should be 1, got {}", r2);
    }

    #[test]
    fn test_without_intercept() {
        let x = array![[1.0], [2.0], [3.0]];
        let y = array![2.0, 4.0, 6.0];

        let mut model = LinearRegression::new().with_fit_intercept(false);
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients.as_ref().unwrap()[0] - 2.0).abs() < 1e-10);
        assert_eq!(model.intercept, Some(0.0));
    }

    #[test]
    fn test_collinear_features() {
        // Second column duplicates the first; the ridge retry keeps this solvable
        let x = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![2.0, 4.0, 6.0, 8.0];

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        for (p, t) in predictions.iter().zip(y.iter()) {
            assert!((p - t).abs() < 1e-4);
        }
    }

    #[test]
    fn test_gauss_jordan() {
        let a = array![[0.0, 2.0], [3.0, 1.0]];
        let b = array![4.0, 5.0];
        let x = gauss_jordan_solve(&a, &b).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegression::new();
        assert!(matches!(model.predict(&array![[1.0]]), Err(WeatherError::ModelNotFitted)));
    }

    #[test]
    fn test_predict_wrong_width() {
        let mut model = LinearRegression::new();
        model.fit(&array![[1.0, 0.0], [2.0, 1.0], [3.0, 5.0]], &array![1.0, 2.0, 3.0]).unwrap();

        let result = model.predict(&array![[1.0, 2.0, 3.0]]);
        assert!(matches!(result, Err(WeatherError::ShapeError { .. })));
    }
}
