//! Exhaustive hyperparameter search with cross-validation

use super::cross_validation::{CVSplit, CrossValidator};
use super::models::Regressor;
use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2, Axis};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Cross-validation outcome of one candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvResult<P> {
    pub params: P,
    /// R² of each fold, in fold order
    pub fold_scores: Vec<f64>,
    pub mean_test_score: f64,
    pub std_test_score: f64,
    /// 1 = best
    pub rank: usize,
}

/// Result of a grid search: the winning candidate refit on all search data.
///
/// Behaves as a regressor itself; predictions come from the refit estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSearchCv<P, E> {
    best_params: P,
    best_score: f64,
    cv_results: Vec<CvResult<P>>,
    best_estimator: E,
}

impl<P, E> GridSearchCv<P, E>
where
    P: Clone + Send + Sync + fmt::Display,
    E: Regressor,
{
    /// Evaluate every candidate on every split produced by `cv`, pick the best
    /// mean R² (earliest candidate on ties) and refit it on all of `(x, y)`.
    ///
    /// Candidate × fold fits run on the current rayon pool.
    pub fn search<F>(candidates: &[P], build: F, x: &Array2<f64>, y: &Array1<f64>, cv: &CrossValidator) -> Result<Self>
    where
        F: Fn(&P) -> E + Sync,
    {
        if candidates.is_empty() {
            return Err(WeatherError::ValidationError(
                "Grid search needs at least one candidate".to_string(),
            ));
        }
        if x.nrows() != y.len() {
            return Err(WeatherError::ShapeError {
                expected: format!("y length = {}", x.nrows()),
                actual: format!("y length = {}", y.len()),
            });
        }

        let splits = cv.split(x.nrows())?;
        let n_splits = splits.len();
        debug!(
            n_candidates = candidates.len(),
            n_splits,
            "Starting grid search ({} fits)",
            candidates.len() * n_splits
        );

        let tasks: Vec<(usize, &CVSplit)> = (0..candidates.len())
            .flat_map(|c| splits.iter().map(move |s| (c, s)))
            .collect();

        let scores: Vec<f64> = tasks
            .par_iter()
            .map(|&(c, split)| -> Result<f64> {
                let x_train = x.select(Axis(0), &split.train_indices);
                let y_train = y.select(Axis(0), &split.train_indices);
                let x_test = x.select(Axis(0), &split.test_indices);
                let y_test = y.select(Axis(0), &split.test_indices);

                let mut estimator = build(&candidates[c]);
                estimator.fit(&x_train, &y_train)?;
                estimator.score(&x_test, &y_test)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut cv_results: Vec<CvResult<P>> = candidates
            .iter()
            .zip(scores.chunks(n_splits))
            .map(|(params, fold_scores)| {
                let mean = fold_scores.iter().sum::<f64>() / n_splits as f64;
                let var = fold_scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n_splits as f64;
                CvResult {
                    params: params.clone(),
                    fold_scores: fold_scores.to_vec(),
                    mean_test_score: mean,
                    std_test_score: var.sqrt(),
                    rank: 0,
                }
            })
            .collect();

        assign_ranks(&mut cv_results);

        let best_idx = cv_results
            .iter()
            .position(|r| r.rank == 1)
            .ok_or_else(|| WeatherError::ComputationError("No candidate could be ranked".to_string()))?;
        let best_params = cv_results[best_idx].params.clone();
        let best_score = cv_results[best_idx].mean_test_score;

        debug!(best_score, "Best parameters: {}", best_params);

        let mut best_estimator = build(&best_params);
        best_estimator.fit(x, y)?;

        Ok(Self {
            best_params,
            best_score,
            cv_results,
            best_estimator,
        })
    }

    pub fn best_params(&self) -> &P {
        &self.best_params
    }

    /// Mean cross-validated R² of the best candidate
    pub fn best_score(&self) -> f64 {
        self.best_score
    }

    pub fn cv_results(&self) -> &[CvResult<P>] {
        &self.cv_results
    }

    pub fn best_estimator(&self) -> &E {
        &self.best_estimator
    }
}

/// Dense ranking by mean score, descending. NaN means rank last; ties share
/// the rank of the earliest candidate.
fn assign_ranks<P>(results: &mut [CvResult<P>]) {
    let key = |r: &CvResult<P>| {
        if r.mean_test_score.is_nan() {
            f64::NEG_INFINITY
        } else {
            r.mean_test_score
        }
    };

    let mut order: Vec<usize> = (0..results.len()).collect();
    order.sort_by(|&a, &b| {
        key(&results[b])
            .partial_cmp(&key(&results[a]))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.cmp(&b))
    });

    let mut rank = 0;
    let mut previous: Option<f64> = None;
    for (pos, &idx) in order.iter().enumerate() {
        let score = key(&results[idx]);
        if previous != Some(score) {
            rank = pos + 1;
            previous = Some(score);
        }
        results[idx].rank = rank;
    }
}

impl<P, E> Regressor for GridSearchCv<P, E>
where
    P: Send + Sync,
    E: Regressor,
{
    /// Refit the selected hyperparameters on new data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        self.best_estimator.fit(x, y)
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        self.best_estimator.predict(x)
    }

    fn n_features(&self) -> Option<usize> {
        self.best_estimator.n_features()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::cross_validation::CVStrategy;
    use crate::training::decision_tree::DecisionTreeRegressor;
    use ndarray::Array;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Depth(Option<usize>);

    impl fmt::Display for Depth {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "max_depth={:?}", self.0)
        }
    }

    fn step_data() -> (Array2<f64>, Array1<f64>) {
        // Two-level step needs depth >= 2
        let x = Array::from_shape_fn((40, 1), |(i, _)| i as f64);
        let y = x.column(0).mapv(|v| if v < 10.0 { 0.0 } else if v < 20.0 { 5.0 } else { 10.0 });
        (x, y)
    }

    #[test]
    fn test_selects_deeper_tree_for_step_function() {
        let (x, y) = step_data();
        let candidates = [Depth(Some(1)), Depth(Some(3))];
        let cv = CrossValidator::new(CVStrategy::KFold { n_splits: 4, shuffle: true }).with_random_state(0);

        let search = GridSearchCv::search(
            &candidates,
            |d: &Depth| DecisionTreeRegressor::new().with_max_depth(d.0),
            &x,
            &y,
            &cv,
        )
        .unwrap();

        assert_eq!(*search.best_params(), Depth(Some(3)));
        assert_eq!(search.cv_results().len(), 2);
        assert_eq!(search.cv_results()[1].rank, 1);
        assert_eq!(search.cv_results()[0].fold_scores.len(), 4);
        assert!(search.best_score() > search.cv_results()[0].mean_test_score);

        // Refit estimator predicts the training steps exactly
        let predictions = search.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_ties_prefer_first_candidate() {
        let mut results = vec![
            CvResult { params: 0, fold_scores: vec![], mean_test_score: 0.5, std_test_score: 0.0, rank: 0 },
            CvResult { params: 1, fold_scores: vec![], mean_test_score: 0.9, std_test_score: 0.0, rank: 0 },
            CvResult { params: 2, fold_scores: vec![], mean_test_score: 0.9, std_test_score: 0.0, rank: 0 },
            CvResult { params: 3, fold_scores: vec![], mean_test_score: f64::NAN, std_test_score: 0.0, rank: 0 },
        ];
        assign_ranks(&mut results);

        let ranks: Vec<usize> = results.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![3, 1, 1, 4]);
        assert_eq!(results.iter().position(|r| r.rank == 1), Some(1));
    }

    #[test]
    fn test_empty_grid() {
        let (x, y) = step_data();
        let cv = CrossValidator::new(CVStrategy::default());
        let result = GridSearchCv::search(&[] as &[Depth], |_| DecisionTreeRegressor::new(), &x, &y, &cv);
        assert!(matches!(result, Err(WeatherError::ValidationError(_))));
    }
}
