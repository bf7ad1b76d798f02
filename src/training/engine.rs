//! Training engine implementation

use super::config::{ForestParams, ModelType, TrainingConfig};
use super::cross_validation::{train_test_split, CVStrategy, CrossValidator};
use super::grid_search::GridSearchCv;
use super::linear_models::LinearRegression;
use super::metrics::RegressionMetrics;
use super::models::Regressor;
use super::pipeline::Pipeline;
use super::random_forest::RandomForestRegressor;
use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

/// Random forest pipeline tuned by grid search
pub type TunedForest = GridSearchCv<ForestParams, Pipeline<RandomForestRegressor>>;

/// A fitted model, as produced by [`train_model`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrainedModel {
    Linear(Pipeline<LinearRegression>),
    RandomForest(TunedForest),
}

impl TrainedModel {
    pub fn model_type(&self) -> ModelType {
        match self {
            TrainedModel::Linear(_) => ModelType::Linear,
            TrainedModel::RandomForest(_) => ModelType::RandomForest,
        }
    }

    fn as_regressor(&self) -> &dyn Regressor {
        match self {
            TrainedModel::Linear(m) => m,
            TrainedModel::RandomForest(m) => m,
        }
    }
}

impl Regressor for TrainedModel {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        match self {
            TrainedModel::Linear(m) => m.fit(x, y),
            TrainedModel::RandomForest(m) => m.fit(x, y),
        }
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.as_regressor().predict(x)
    }

    fn n_features(&self) -> Option<usize> {
        self.as_regressor().n_features()
    }
}

/// Train a regression model with the default configuration.
///
/// `model_type` is `"linear"` or `"random_forest"`; anything else fails with
/// [`WeatherError::InvalidParameter`] before the data is touched.
pub fn train_model(x: &Array2<f64>, y: &Array1<f64>, model_type: &str) -> Result<TrainedModel> {
    let model_type: ModelType = model_type.parse()?;
    train_model_with_config(x, y, model_type, &TrainingConfig::default())
}

/// Train a regression model.
///
/// Holds out `config.test_size` of the rows (seeded by `config.random_state`),
/// fits on the rest and logs the held-out R².
pub fn train_model_with_config(
    x: &Array2<f64>,
    y: &Array1<f64>,
    model_type: ModelType,
    config: &TrainingConfig,
) -> Result<TrainedModel> {
    let start = Instant::now();
    let split = train_test_split(x, y, config.test_size, config.random_state)?;
    debug!(
        n_train = split.x_train.nrows(),
        n_test = split.x_test.nrows(),
        "Split data for {} model",
        model_type
    );

    let model = match model_type {
        ModelType::Linear => {
            let mut pipeline = Pipeline::new(LinearRegression::new());
            pipeline.fit(&split.x_train, &split.y_train)?;
            TrainedModel::Linear(pipeline)
        }
        ModelType::RandomForest => TrainedModel::RandomForest(search_forest(&split.x_train, &split.y_train, config)?),
    };

    let y_pred = model.predict(&split.x_test)?;
    let metrics = RegressionMetrics::compute(&split.y_test, &y_pred)?;
    let score = metrics.r2;

    info!(model_type = %model_type, score, "Model {} training score: {:.2}", model_type, score);
    debug!(
        mse = metrics.mse,
        mae = metrics.mae,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Held-out metrics"
    );

    Ok(model)
}

fn search_forest(x: &Array2<f64>, y: &Array1<f64>, config: &TrainingConfig) -> Result<TunedForest> {
    let candidates = config.param_grid.candidates();
    if candidates.is_empty() {
        return Err(WeatherError::ValidationError(
            "Random forest parameter grid is empty".to_string(),
        ));
    }

    let cv = CrossValidator::new(CVStrategy::KFold {
        n_splits: config.cv_folds,
        shuffle: false,
    });
    let seed = config.random_state;
    let build = |p: &ForestParams| {
        Pipeline::new(
            RandomForestRegressor::new(p.n_estimators)
                .with_max_depth(p.max_depth)
                .with_random_state(seed),
        )
    };

    match config.n_jobs {
        None => GridSearchCv::search(&candidates, build, x, y, &cv),
        Some(n_jobs) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n_jobs).build()?;
            pool.install(|| GridSearchCv::search(&candidates, build, x, y, &cv))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::config::ForestParamGrid;
    use ndarray::Array;

    fn linear_data(n: usize) -> (Array2<f64>, Array1<f64>) {
        let x = Array::from_shape_fn((n, 3), |(i, j)| ((i * 7 + j * 13) % 17) as f64 + j as f64);
        let y = x
            .rows()
            .into_iter()
            .map(|r| 2.0 * r[0] - 0.5 * r[1] + 0.25 * r[2] + 3.0)
            .collect::<Array1<f64>>();
        (x, y)
    }

    #[test]
    fn test_train_linear() {
        let (x, y) = linear_data(30);
        let model = train_model(&x, &y, "linear").unwrap();

        assert_eq!(model.model_type(), ModelType::Linear);
        assert_eq!(model.n_features(), Some(3));
        let score = model.score(&x, &y).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_model_type() {
        let (x, y) = linear_data(30);
        let result = train_model(&x, &y, "xgboost");
        assert!(matches!(result, Err(WeatherError::InvalidParameter { .. })));
    }

    #[test]
    fn test_unknown_model_type_checked_before_data() {
        // Mismatched shapes would fail the split; the selector is rejected first
        let x = Array2::<f64>::zeros((4, 3));
        let y = Array1::<f64>::zeros(2);
        assert!(matches!(
            train_model(&x, &y, "svm"),
            Err(WeatherError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_train_forest_small_grid() {
        let (x, y) = linear_data(40);
        let config = TrainingConfig::default()
            .with_cv_folds(3)
            .with_n_jobs(2)
            .with_param_grid(ForestParamGrid {
                n_estimators: vec![5, 10],
                max_depth: vec![None, Some(2)],
            });

        let model = train_model_with_config(&x, &y, ModelType::RandomForest, &config).unwrap();
        match &model {
            TrainedModel::RandomForest(search) => {
                assert_eq!(search.cv_results().len(), 4);
                assert_eq!(search.best_estimator().regressor().n_trees(), search.best_params().n_estimators);
            }
            other => panic!("unexpected model: {:?}", other.model_type()),
        }
        assert_eq!(model.predict(&x).unwrap().len(), 40);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let (x, y) = linear_data(20);
        let config = TrainingConfig::default().with_param_grid(ForestParamGrid {
            n_estimators: vec![],
            max_depth: vec![None],
        });
        let result = train_model_with_config(&x, &y, ModelType::RandomForest, &config);
        assert!(matches!(result, Err(WeatherError::ValidationError(_))));
    }
}
