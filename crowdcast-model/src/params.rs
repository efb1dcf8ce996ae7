//! Hyperparameters for gradient-boosted tree training.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::TrainingError;

/// Deepest tree the grower accepts.
const MAX_SUPPORTED_DEPTH: usize = 16;

/// Hyperparameters for [`crate::train_from_samples`].
///
/// Defaults match the reference training run: 100 boosting rounds of depth-6
/// trees with learning rate `0.1`, evaluated on a 20% hold-out drawn with
/// seed `42`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainParams {
    /// Number of boosting rounds.
    pub n_estimators: usize,
    /// Maximum depth of each tree; a depth of `0` grows single leaves.
    pub max_depth: usize,
    /// Shrinkage applied to every leaf value.
    pub learning_rate: f64,
    /// L2 regularisation on leaf weights.
    pub reg_lambda: f64,
    /// Minimum samples on each side of a split.
    pub min_samples_leaf: usize,
    /// Minimum loss reduction required to split a node.
    pub min_split_gain: f64,
    /// Share of samples held out for evaluation.
    pub test_fraction: f64,
    /// Seed for the train/test shuffle.
    pub seed: u64,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: 6,
            learning_rate: 0.1,
            reg_lambda: 1.0,
            min_samples_leaf: 1,
            min_split_gain: 0.0,
            test_fraction: 0.2,
            seed: 42,
        }
    }
}

impl TrainParams {
    /// Validate the parameters and return a copy.
    ///
    /// # Errors
    /// Returns [`TrainingError::InvalidParams`] naming the first parameter
    /// outside its valid range.
    pub fn validate(self) -> Result<Self, TrainingError> {
        let invalid = |name, reason| Err(TrainingError::InvalidParams { name, reason });
        if self.n_estimators == 0 {
            return invalid("n_estimators", "must be at least 1");
        }
        if self.max_depth > MAX_SUPPORTED_DEPTH {
            return invalid("max_depth", "must not exceed 16");
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return invalid("learning_rate", "must be finite and positive");
        }
        if !(self.reg_lambda.is_finite() && self.reg_lambda >= 0.0) {
            return invalid("reg_lambda", "must be finite and non-negative");
        }
        if self.min_samples_leaf == 0 {
            return invalid("min_samples_leaf", "must be at least 1");
        }
        if !(self.min_split_gain.is_finite() && self.min_split_gain >= 0.0) {
            return invalid("min_split_gain", "must be finite and non-negative");
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return invalid("test_fraction", "must lie strictly between 0 and 1");
        }
        Ok(self)
    }
}
