//! Additive ensemble of regression trees fitted by gradient boosting.
#![forbid(unsafe_code)]

use crowdcast_core::{FeatureRow, InferenceError, LabeledSample, Regressor};
use serde::{Deserialize, Serialize};

use crate::grow::{TreeGrower, bin_rows};
use crate::{RegressionTree, TrainParams, TrainingError};

/// Gradient-boosted regression trees under squared-error loss.
///
/// A prediction is the base score (the training mean) plus the sum of one
/// leaf value per tree. Leaf values already include the learning-rate
/// shrinkage, so no hyperparameters are needed at inference time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostedTrees {
    base_score: f64,
    trees: Vec<RegressionTree>,
}

impl BoostedTrees {
    /// Fit an ensemble to `samples`.
    ///
    /// Each round fits a tree to the residuals of the current ensemble and
    /// adds it. Growth is deterministic for identical inputs.
    ///
    /// # Errors
    /// Returns [`TrainingError::EmptyTrainingSet`] for an empty slice and
    /// [`TrainingError::InvalidParams`] when `params` fail validation.
    #[expect(
        clippy::float_arithmetic,
        reason = "boosting updates residuals and running predictions"
    )]
    pub fn fit(samples: &[LabeledSample], params: &TrainParams) -> Result<Self, TrainingError> {
        let params = params.validate()?;
        if samples.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }
        let rows: Vec<FeatureRow> = samples
            .iter()
            .map(|sample| sample.features().to_row())
            .collect();
        let targets: Vec<f64> = samples.iter().map(LabeledSample::crowd_score).collect();
        let bins = bin_rows(&rows);
        let base_score = mean(&targets);

        let mut predictions = vec![base_score; targets.len()];
        let mut trees = Vec::with_capacity(params.n_estimators);
        for round in 0..params.n_estimators {
            let residuals: Vec<f64> = targets
                .iter()
                .zip(&predictions)
                .map(|(target, prediction)| target - prediction)
                .collect();
            let tree = TreeGrower::new(&bins, &residuals, &params).grow();
            for (prediction, row) in predictions.iter_mut().zip(&rows) {
                *prediction += tree.predict_row(row)?;
            }
            log::trace!(
                "boosting round {round}: {} leaves, train mse {:.4}",
                tree.leaf_count(),
                mean_squared(&residuals)
            );
            trees.push(tree);
        }
        log::debug!(
            "fitted {} trees on {} samples (base score {base_score:.3})",
            trees.len(),
            samples.len()
        );
        Ok(Self { base_score, trees })
    }

    /// Mean target seen during training.
    #[must_use]
    pub const fn base_score(&self) -> f64 {
        self.base_score
    }

    /// Trees in boosting order.
    #[must_use]
    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Check every tree is well formed and the base score is finite.
    ///
    /// # Errors
    /// Returns the first structural problem found.
    pub fn validate(&self) -> Result<(), InferenceError> {
        if !self.base_score.is_finite() {
            return Err(InferenceError::Backend {
                message: "base score is not finite".to_owned(),
            });
        }
        self.trees.iter().try_for_each(RegressionTree::validate)
    }

    /// Raw prediction for one row.
    ///
    /// # Errors
    /// Propagates [`RegressionTree::predict_row`] failures.
    #[expect(
        clippy::float_arithmetic,
        reason = "ensemble output sums tree contributions"
    )]
    pub fn predict_row(&self, row: &FeatureRow) -> Result<f64, InferenceError> {
        self.trees
            .iter()
            .try_fold(self.base_score, |total, tree| Ok(total + tree.predict_row(row)?))
    }
}

impl Regressor for BoostedTrees {
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    fn name(&self) -> &'static str {
        "boosted-trees"
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "averaging over the sample count"
)]
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[expect(clippy::float_arithmetic, reason = "squares residuals")]
fn mean_squared(residuals: &[f64]) -> f64 {
    let squares: Vec<f64> = residuals.iter().map(|residual| residual * residual).collect();
    mean(&squares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdcast_core::{FeatureVector, Season, Weather};
    use rstest::rstest;

    fn sample(hour: u8, weekday: u8, score: f64) -> LabeledSample {
        let features = FeatureVector::new(
            hour,
            weekday,
            weekday >= 5,
            false,
            Season::Spring,
            Weather::Clear,
        )
        .expect("valid features");
        LabeledSample::new(features, score).expect("valid sample")
    }

    fn step_samples() -> Vec<LabeledSample> {
        (0..24_u8)
            .flat_map(|hour| (0..7_u8).map(move |weekday| (hour, weekday)))
            .map(|(hour, weekday)| {
                let score = if hour >= 10 { 80.0 } else { 20.0 };
                sample(hour, weekday, score)
            })
            .collect()
    }

    #[rstest]
    fn learns_a_step_function() {
        let samples = step_samples();
        let model = BoostedTrees::fit(&samples, &TrainParams::default()).expect("fit");

        let rows = [
            sample(3, 1, 0.0).features().to_row(),
            sample(15, 1, 0.0).features().to_row(),
        ];
        let scores = model.predict(&rows).expect("predict");
        assert_eq!(scores.len(), 2);
        assert!(scores.first().is_some_and(|score| (score - 20.0).abs() < 1.0));
        assert!(scores.get(1).is_some_and(|score| (score - 80.0).abs() < 1.0));
        assert_eq!(model.trees().len(), 100);
        assert!(model.validate().is_ok());
    }

    #[rstest]
    fn base_score_is_the_training_mean() {
        let samples = vec![sample(1, 1, 10.0), sample(2, 1, 30.0)];
        let params = TrainParams {
            n_estimators: 1,
            max_depth: 0,
            ..TrainParams::default()
        };
        let model = BoostedTrees::fit(&samples, &params).expect("fit");
        assert!((model.base_score() - 20.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn fitting_is_deterministic() {
        let samples = step_samples();
        let params = TrainParams {
            n_estimators: 10,
            ..TrainParams::default()
        };
        let first = BoostedTrees::fit(&samples, &params).expect("fit");
        let second = BoostedTrees::fit(&samples, &params).expect("fit");
        assert_eq!(first, second);
    }

    #[rstest]
    fn refuses_empty_input() {
        assert!(matches!(
            BoostedTrees::fit(&[], &TrainParams::default()),
            Err(TrainingError::EmptyTrainingSet)
        ));
    }

    #[rstest]
    fn refuses_invalid_params() {
        let params = TrainParams {
            learning_rate: -0.1,
            ..TrainParams::default()
        };
        assert!(matches!(
            BoostedTrees::fit(&step_samples(), &params),
            Err(TrainingError::InvalidParams {
                name: "learning_rate",
                ..
            })
        ));
    }
}
