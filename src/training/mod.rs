//! Model training module
//!
//! Provides the regression models used for weather prediction:
//! - Ordinary least squares behind a standardizing pipeline
//! - Decision trees and Random Forests
//! - K-Fold cross-validation and exhaustive grid search
//! - The `train_model` entry point tying them together

mod config;
mod engine;
mod models;
pub mod cross_validation;
pub mod decision_tree;
pub mod grid_search;
pub mod linear_models;
pub mod metrics;
pub mod pipeline;
pub mod random_forest;

pub use config::{ForestParamGrid, ForestParams, ModelType, TrainingConfig};
pub use cross_validation::{train_test_split, CVSplit, CVStrategy, CrossValidator, TrainTestSplit};
pub use decision_tree::{DecisionTreeRegressor, TreeNode};
pub use engine::{train_model, train_model_with_config, TrainedModel, TunedForest};
pub use grid_search::{CvResult, GridSearchCv};
pub use linear_models::LinearRegression;
pub use metrics::{mean_absolute_error, mean_squared_error, r2_score, RegressionMetrics};
pub use models::Regressor;
pub use pipeline::Pipeline;
pub use random_forest::{MaxFeatures, RandomForestRegressor};
