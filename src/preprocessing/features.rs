//! Feature table assembly from gridded weather variables

use crate::error::{Result, WeatherError};
use ndarray::{Array2, ArrayBase, Data, Dimension};

/// Column order of every feature table. Models learn coefficients and splits
/// positionally, so this order is part of the training schema.
pub const FEATURE_NAMES: [&str; 3] = ["temperature", "humidity", "wind_speed"];

/// Number of columns in a feature table
pub const N_FEATURES: usize = FEATURE_NAMES.len();

/// Stack three equally shaped grids into a `(cells, 3)` feature table.
///
/// Row `k` holds `[temperature, humidity, wind_speed]` of the `k`-th cell in
/// row-major order, whatever the dimensionality of the inputs.
pub fn prepare_data<S1, S2, S3, D>(
    temperature: &ArrayBase<S1, D>,
    humidity: &ArrayBase<S2, D>,
    wind_speed: &ArrayBase<S3, D>,
) -> Result<Array2<f64>>
where
    S1: Data<Elem = f64>,
    S2: Data<Elem = f64>,
    S3: Data<Elem = f64>,
    D: Dimension,
{
    for (name, shape) in FEATURE_NAMES[1..].iter().zip([humidity.shape(), wind_speed.shape()]) {
        if shape != temperature.shape() {
            return Err(WeatherError::ShapeError {
                expected: format!("{} shape = {:?}", name, temperature.shape()),
                actual: format!("{} shape = {:?}", name, shape),
            });
        }
    }

    let mut table = Array2::zeros((temperature.len(), N_FEATURES));
    let cells = temperature.iter().zip(humidity.iter()).zip(wind_speed.iter());
    for (mut row, ((&t, &h), &w)) in table.rows_mut().into_iter().zip(cells) {
        row[0] = t;
        row[1] = h;
        row[2] = w;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array, Array3, Axis};

    #[test]
    fn test_prepare_single_row() {
        let t = array![[1.0, 2.0]];
        let h = array![[3.0, 4.0]];
        let w = array![[5.0, 6.0]];

        let x = prepare_data(&t, &h, &w).unwrap();
        assert_eq!(x, array![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0]]);
    }

    #[test]
    fn test_columns_follow_row_major_order() {
        let t = Array::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f64);
        let h = t.mapv(|v| v + 100.0);
        let w = t.mapv(|v| v * -1.0);

        let x = prepare_data(&t, &h, &w).unwrap();
        assert_eq!(x.dim(), (12, 3));
        for (k, row) in x.axis_iter(Axis(0)).enumerate() {
            assert_eq!(row[0], k as f64);
            assert_eq!(row[1], k as f64 + 100.0);
            assert_eq!(row[2], -(k as f64));
        }
    }

    #[test]
    fn test_transposed_view_uses_logical_order() {
        let base = array![[1.0, 2.0], [3.0, 4.0]];
        let t = base.t();
        let x = prepare_data(&t, &t, &t).unwrap();
        assert_eq!(x.column(0).to_vec(), vec![1.0, 3.0, 2.0, 4.0]);
    }

    #[test]
    fn test_mixed_storage() {
        let t = array![[1.0, 2.0], [3.0, 4.0]];
        let h = array![[5.0, 6.0], [7.0, 8.0]];
        let w = array![[9.0, 10.0], [11.0, 12.0]];

        let x = prepare_data(&t, &h.view(), &w.t()).unwrap();
        assert_eq!(x.column(1).to_vec(), vec![5.0, 6.0, 7.0, 8.0]);
        assert_eq!(x.column(2).to_vec(), vec![9.0, 11.0, 10.0, 12.0]);
    }

    #[test]
    fn test_three_dimensional_input() {
        let t = Array3::<f64>::ones((2, 3, 4));
        let x = prepare_data(&t, &t, &t).unwrap();
        assert_eq!(x.dim(), (24, 3));
    }

    #[test]
    fn test_shape_mismatch() {
        let t = array![[1.0, 2.0]];
        let h = array![[3.0, 4.0]];
        let w = array![[5.0], [6.0]];

        let result = prepare_data(&t, &h, &w);
        assert!(matches!(result, Err(WeatherError::ShapeError { .. })));
    }
}
