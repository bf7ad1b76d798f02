//! Training configuration

use crate::error::WeatherError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regression model selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelType {
    /// Standardization + ordinary least squares
    #[default]
    Linear,
    /// Standardization + random forest, tuned by grid search
    RandomForest,
}

impl ModelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelType::Linear => "linear",
            ModelType::RandomForest => "random_forest",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = WeatherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ModelType::Linear),
            "random_forest" => Ok(ModelType::RandomForest),
            other => Err(WeatherError::InvalidParameter {
                name: "model_type".to_string(),
                value: other.to_string(),
                reason: "unsupported model type, choose 'linear' or 'random_forest'".to_string(),
            }),
        }
    }
}

/// Hyperparameters of one random-forest candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    /// `None` grows trees until leaves are pure
    pub max_depth: Option<usize>,
}

impl fmt::Display for ForestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_depth {
            Some(depth) => write!(f, "n_estimators={}, max_depth={}", self.n_estimators, depth),
            None => write!(f, "n_estimators={}, max_depth=None", self.n_estimators),
        }
    }
}

/// Exhaustive search grid for the random forest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParamGrid {
    pub n_estimators: Vec<usize>,
    pub max_depth: Vec<Option<usize>>,
}

impl Default for ForestParamGrid {
    fn default() -> Self {
        Self {
            n_estimators: vec![50, 100, 200],
            max_depth: vec![None, Some(10), Some(20), Some(30)],
        }
    }
}

impl ForestParamGrid {
    /// Every combination, `n_estimators`-major
    pub fn candidates(&self) -> Vec<ForestParams> {
        self.n_estimators
            .iter()
            .flat_map(|&n_estimators| {
                self.max_depth.iter().map(move |&max_depth| ForestParams {
                    n_estimators,
                    max_depth,
                })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.n_estimators.len() * self.max_depth.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Configuration for model training
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Fraction of rows held out for the final score
    pub test_size: f64,
    /// Seed for the train/test split and the forest
    pub random_state: u64,
    /// Folds used by the grid search
    pub cv_folds: usize,
    /// Worker threads for the grid search (`None` = all available)
    pub n_jobs: Option<usize>,
    /// Random-forest search grid
    pub param_grid: ForestParamGrid,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            test_size: 0.2,
            random_state: 42,
            cv_folds: 5,
            n_jobs: None,
            param_grid: ForestParamGrid::default(),
        }
    }
}

impl TrainingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test_size(mut self, test_size: f64) -> Self {
        self.test_size = test_size;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    pub fn with_cv_folds(mut self, folds: usize) -> Self {
        self.cv_folds = folds;
        self
    }

    pub fn with_n_jobs(mut self, n_jobs: usize) -> Self {
        self.n_jobs = Some(n_jobs);
        self
    }

    pub fn with_param_grid(mut self, grid: ForestParamGrid) -> Self {
        self.param_grid = grid;
        self
    }
}
