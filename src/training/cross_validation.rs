//! Train/test partitioning and cross-validation splitters

use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Cross-validation strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CVStrategy {
    /// K-Fold cross-validation
    KFold { n_splits: usize, shuffle: bool },
    /// One random split with a held-out fraction
    ShuffleSplit { test_size: f64 },
}

impl Default for CVStrategy {
    fn default() -> Self {
        CVStrategy::KFold { n_splits: 5, shuffle: false }
    }
}

/// A single train/test split
#[derive(Debug, Clone)]
pub struct CVSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Cross-validation splitter
#[derive(Debug, Clone)]
pub struct CrossValidator {
    strategy: CVStrategy,
    random_state: Option<u64>,
}

impl CrossValidator {
    /// Create a new cross-validator
    pub fn new(strategy: CVStrategy) -> Self {
        Self {
            strategy,
            random_state: None,
        }
    }

    /// Set random state for reproducibility
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Generate train/test splits
    pub fn split(&self, n_samples: usize) -> Result<Vec<CVSplit>> {
        match self.strategy {
            CVStrategy::KFold { n_splits, shuffle } => self.k_fold_split(n_samples, n_splits, shuffle),
            CVStrategy::ShuffleSplit { test_size } => self.shuffle_split(n_samples, test_size),
        }
    }

    fn rng(&self) -> ChaCha8Rng {
        match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    fn k_fold_split(&self, n_samples: usize, n_splits: usize, shuffle: bool) -> Result<Vec<CVSplit>> {
        if n_splits < 2 {
            return Err(WeatherError::ValidationError(
                "n_splits must be at least 2".to_string(),
            ));
        }
        if n_samples < n_splits {
            return Err(WeatherError::ValidationError(format!(
                "n_samples ({}) must be >= n_splits ({})",
                n_samples, n_splits
            )));
        }

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if shuffle {
            indices.shuffle(&mut self.rng());
        }

        // The first n_samples % n_splits folds take one extra sample
        let base = n_samples / n_splits;
        let remainder = n_samples % n_splits;

        let mut splits = Vec::with_capacity(n_splits);
        let mut current = 0;

        for fold_idx in 0..n_splits {
            let fold_size = if fold_idx < remainder { base + 1 } else { base };
            let test_indices = indices[current..current + fold_size].to_vec();
            let train_indices: Vec<usize> = indices[..current]
                .iter()
                .chain(indices[current + fold_size..].iter())
                .copied()
                .collect();

            splits.push(CVSplit {
                train_indices,
                test_indices,
                fold_idx,
            });

            current += fold_size;
        }

        Ok(splits)
    }

    /// Held-out rows are the first `ceil(test_size * n)` entries of a seeded
    /// permutation, the remaining rows train.
    fn shuffle_split(&self, n_samples: usize, test_size: f64) -> Result<Vec<CVSplit>> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(WeatherError::InvalidParameter {
                name: "test_size".to_string(),
                value: test_size.to_string(),
                reason: "must lie strictly between 0 and 1".to_string(),
            });
        }

        let n_test = (test_size * n_samples as f64).ceil() as usize;
        let n_train = n_samples.saturating_sub(n_test);
        if n_test == 0 || n_train == 0 {
            return Err(WeatherError::ValidationError(format!(
                "With n_samples = {} and test_size = {}, one partition would be empty",
                n_samples, test_size
            )));
        }

        let mut permutation: Vec<usize> = (0..n_samples).collect();
        permutation.shuffle(&mut self.rng());
        let train_indices = permutation.split_off(n_test);

        Ok(vec![CVSplit {
            train_indices,
            test_indices: permutation,
            fold_idx: 0,
        }])
    }
}

/// Training and held-out partitions of a feature table and its targets
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub x_train: Array2<f64>,
    pub x_test: Array2<f64>,
    pub y_train: Array1<f64>,
    pub y_test: Array1<f64>,
}

/// Split `(x, y)` into training and held-out partitions.
///
/// The same data, `test_size` and `seed` always yield the same partitions.
pub fn train_test_split(x: &Array2<f64>, y: &Array1<f64>, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if x.nrows() != y.len() {
        return Err(WeatherError::ShapeError {
            expected: format!("y length = {}", x.nrows()),
            actual: format!("y length = {}", y.len()),
        });
    }

    let splits = CrossValidator::new(CVStrategy::ShuffleSplit { test_size })
        .with_random_state(seed)
        .split(x.nrows())?;
    let split = &splits[0];

    Ok(TrainTestSplit {
        x_train: x.select(Axis(0), &split.train_indices),
        x_test: x.select(Axis(0), &split.test_indices),
        y_train: y.select(Axis(0), &split.train_indices),
        y_test: y.select(Axis(0), &split.test_indices),
    })
}
