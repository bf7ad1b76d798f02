//! Regression tree (CART, squared-error criterion)

use super::models::{check_width, check_xy, Regressor};
use crate::error::{Result, WeatherError};
use ndarray::{Array1, Array2, ArrayView1};
use rand::seq::index::sample;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Decision tree node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Leaf node with prediction value
    Leaf {
        value: f64,
        n_samples: usize,
    },
    /// Internal node with split
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
        n_samples: usize,
        impurity: f64,
    },
}

/// Best split found for one node
struct SplitCandidate {
    feature_idx: usize,
    threshold: f64,
    /// Summed squared error of both children
    child_sse: f64,
}

/// Regression tree fitted by greedy variance reduction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    root: Option<TreeNode>,
    /// Maximum depth (`None` grows until leaves are pure or too small)
    pub max_depth: Option<usize>,
    /// Minimum samples to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf
    pub min_samples_leaf: usize,
    /// Number of features drawn at random for each split (`None` = all)
    pub max_features: Option<usize>,
    /// Seed for feature subsampling
    pub random_state: Option<u64>,
    n_features: usize,
    feature_importances: Option<Array1<f64>>,
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTreeRegressor {
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            random_state: None,
            n_features: 0,
            feature_importances: None,
        }
    }

    /// Set maximum depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set minimum samples to split
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Set minimum samples in leaf
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    /// Set number of features considered per split
    pub fn with_max_features(mut self, max_features: Option<usize>) -> Self {
        self.max_features = max_features;
        self
    }

    /// Set random state
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Get feature importances (normalized impurity decrease)
    pub fn feature_importances(&self) -> Option<&Array1<f64>> {
        self.feature_importances.as_ref()
    }

    /// Get tree depth (a single leaf has depth 0)
    pub fn depth(&self) -> usize {
        fn node_depth(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + node_depth(left).max(node_depth(right)),
            }
        }
        self.root.as_ref().map_or(0, node_depth)
    }

    /// Get number of leaves
    pub fn n_leaves(&self) -> usize {
        fn count_leaves(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Split { left, right, .. } => count_leaves(left) + count_leaves(right),
            }
        }
        self.root.as_ref().map_or(0, count_leaves)
    }

    fn build_tree(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &mut [usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
        importances: &mut [f64],
    ) -> TreeNode {
        let n_samples = indices.len();
        let (sum, sq_sum) = indices
            .iter()
            .fold((0.0, 0.0), |(s, sq), &i| (s + y[i], sq + y[i] * y[i]));
        let value = sum / n_samples as f64;
        let node_sse = sse(n_samples, sum, sq_sum);

        let should_stop = n_samples < self.min_samples_split
            || n_samples < 2 * self.min_samples_leaf
            || self.max_depth.map_or(false, |d| depth >= d)
            || node_sse <= 1e-12 * n_samples as f64;

        if should_stop {
            return TreeNode::Leaf { value, n_samples };
        }

        let split = match self.find_best_split(x, y, indices, node_sse, rng) {
            Some(split) => split,
            None => return TreeNode::Leaf { value, n_samples },
        };

        importances[split.feature_idx] += node_sse - split.child_sse;

        let n_left = partition_in_place(indices, |i| x[[i, split.feature_idx]] <= split.threshold);
        let (left_indices, right_indices) = indices.split_at_mut(n_left);

        let left = Box::new(self.build_tree(x, y, left_indices, depth + 1, rng, importances));
        let right = Box::new(self.build_tree(x, y, right_indices, depth + 1, rng, importances));

        TreeNode::Split {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            left,
            right,
            n_samples,
            impurity: node_sse / n_samples as f64,
        }
    }

    /// Scan every candidate feature in sorted order, tracking prefix sums so
    /// each threshold is scored in O(1).
    fn find_best_split(
        &self,
        x: &Array2<f64>,
        y: &Array1<f64>,
        indices: &[usize],
        node_sse: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<SplitCandidate> {
        let n_features = x.ncols();
        let features: Vec<usize> = match self.max_features {
            Some(k) if k < n_features => sample(rng, n_features, k.max(1)).into_vec(),
            _ => (0..n_features).collect(),
        };

        let n = indices.len();
        let (total_sum, total_sq) = indices
            .iter()
            .fold((0.0, 0.0), |(s, sq), &i| (s + y[i], sq + y[i] * y[i]));

        let mut best: Option<SplitCandidate> = None;
        let mut order: Vec<usize> = indices.to_vec();

        for feature_idx in features {
            let column = x.column(feature_idx);
            order.sort_by(|&a, &b| {
                column[a]
                    .partial_cmp(&column[b])
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

            let mut left_sum = 0.0;
            let mut left_sq = 0.0;

            for pos in 0..n - 1 {
                let yi = y[order[pos]];
                left_sum += yi;
                left_sq += yi * yi;

                let n_left = pos + 1;
                let n_right = n - n_left;
                if n_left < self.min_samples_leaf || n_right < self.min_samples_leaf {
                    continue;
                }

                let here = column[order[pos]];
                let next = column[order[pos + 1]];
                if next <= here {
                    continue;
                }

                let child_sse = sse(n_left, left_sum, left_sq)
                    + sse(n_right, total_sum - left_sum, total_sq - left_sq);

                let improves = best.as_ref().map_or(child_sse < node_sse, |b| child_sse < b.child_sse);
                if improves {
                    let mut threshold = here + (next - here) / 2.0;
                    if threshold >= next {
                        threshold = here;
                    }
                    best = Some(SplitCandidate {
                        feature_idx,
                        threshold,
                        child_sse,
                    });
                }
            }
        }

        best
    }

    fn predict_row(node: &TreeNode, row: ArrayView1<f64>) -> f64 {
        let mut node = node;
        loop {
            match node {
                TreeNode::Leaf { value, .. } => return *value,
                TreeNode::Split { feature_idx, threshold, left, right, .. } => {
                    node = if row[*feature_idx] <= *threshold { left } else { right };
                }
            }
        }
    }
}

impl Regressor for DecisionTreeRegressor {
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()> {
        check_xy(x, y)?;
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(WeatherError::ValidationError(
                "Input contains NaN or infinite values".to_string(),
            ));
        }

        self.n_features = x.ncols();
        let mut rng = match self.random_state {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut importances = vec![0.0; self.n_features];
        let mut indices: Vec<usize> = (0..x.nrows()).collect();
        let root = self.build_tree(x, y, &mut indices, 0, &mut rng, &mut importances);

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for imp in &mut importances {
                *imp /= total;
            }
        }

        self.root = Some(root);
        self.feature_importances = Some(Array1::from_vec(importances));
        Ok(())
    }

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let root = self.root.as_ref().ok_or(WeatherError::ModelNotFitted)?;
        check_width(self.n_features, x)?;
        Ok(x.rows().into_iter().map(|row| Self::predict_row(root, row)).collect())
    }

    fn n_features(&self) -> Option<usize> {
        self.root.as_ref().map(|_| self.n_features)
    }
}

/// Sum of squared deviations from the mean, from running sums
fn sse(count: usize, sum: f64, sq_sum: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (sq_sum - sum * sum / count as f64).max(0.0)
}

/// Reorder `indices` so entries matching `pred` come first; returns their count
fn partition_in_place(indices: &mut [usize], pred: impl Fn(usize) -> bool) -> usize {
    let mut split = 0;
    for i in 0..indices.len() {
        if pred(indices[i]) {
            indices.swap(split, i);
            split += 1;
        }
    }
    split
}
