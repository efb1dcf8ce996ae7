//! End-to-end training: shuffle, split, fit and evaluate.
#![forbid(unsafe_code)]

use crowdcast_core::{LabeledSample, Regressor};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::{BoostedTrees, RegressionMetrics, TrainParams, TrainingError};

/// Outcome of [`train_from_samples`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Metrics on the held-out split.
    #[serde(flatten)]
    pub metrics: RegressionMetrics,
    /// Samples the model was fitted on.
    pub train_count: usize,
    /// Samples held out for evaluation.
    pub test_count: usize,
    /// Trees in the fitted ensemble.
    pub tree_count: usize,
}

/// Shuffle `samples` with `seed` and split off `test_fraction` of them.
///
/// Returns `(train, test)`. The test share is rounded up, so any positive
/// fraction holds out at least one sample when `samples` is non-empty.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the test share is a rounded fraction of the sample count"
)]
#[must_use]
pub fn split_samples(
    samples: &[LabeledSample],
    test_fraction: f64,
    seed: u64,
) -> (Vec<LabeledSample>, Vec<LabeledSample>) {
    let mut shuffled = samples.to_vec();
    shuffled.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
    let fraction = test_fraction.clamp(0.0, 1.0);
    let test_count = ((shuffled.len() as f64) * fraction).ceil() as usize;
    let test = shuffled.split_off(shuffled.len().saturating_sub(test_count));
    (shuffled, test)
}

/// Fit a [`BoostedTrees`] ensemble and evaluate it on a held-out split.
///
/// # Errors
/// Returns [`TrainingError::InvalidParams`] for invalid parameters,
/// [`TrainingError::EmptyTrainingSet`] when the split leaves nothing to fit
/// on, and [`TrainingError::EmptyTestSet`] when it leaves nothing to
/// evaluate on.
pub fn train_from_samples(
    samples: &[LabeledSample],
    params: &TrainParams,
) -> Result<(BoostedTrees, TrainingReport), TrainingError> {
    let params = params.validate()?;
    if samples.is_empty() {
        return Err(TrainingError::EmptyTrainingSet);
    }
    let (train, test) = split_samples(samples, params.test_fraction, params.seed);
    if test.is_empty() {
        return Err(TrainingError::EmptyTestSet {
            fraction: params.test_fraction,
        });
    }
    log::info!(
        "training on {} samples, holding out {}",
        train.len(),
        test.len()
    );
    let model = BoostedTrees::fit(&train, &params)?;

    let rows: Vec<_> = test
        .iter()
        .map(|sample| sample.features().to_row())
        .collect();
    let actual: Vec<f64> = test.iter().map(LabeledSample::crowd_score).collect();
    let predicted = model.predict(&rows)?;
    let metrics = RegressionMetrics::evaluate(&actual, &predicted).ok_or(
        TrainingError::EmptyTestSet {
            fraction: params.test_fraction,
        },
    )?;
    log::info!(
        "held-out mse {:.3}, rmse {:.3}, r2 {:.4}",
        metrics.mse,
        metrics.rmse,
        metrics.r2
    );
    let report = TrainingReport {
        metrics,
        train_count: train.len(),
        test_count: test.len(),
        tree_count: model.trees().len(),
    };
    Ok((model, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowdcast_data::Synthesizer;
    use rstest::rstest;

    fn synthetic(count: usize, seed: u64) -> Vec<LabeledSample> {
        Synthesizer::default().generate(count, &mut ChaCha8Rng::seed_from_u64(seed))
    }

    #[rstest]
    #[case(100, 0.2, 80, 20)]
    #[case(10, 0.25, 7, 3)]
    #[case(1, 0.2, 0, 1)]
    #[case(0, 0.2, 0, 0)]
    fn split_sizes_round_the_test_share_up(
        #[case] count: usize,
        #[case] fraction: f64,
        #[case] train: usize,
        #[case] test: usize,
    ) {
        let samples = synthetic(count, 5);
        let (train_set, test_set) = split_samples(&samples, fraction, 42);
        assert_eq!((train_set.len(), test_set.len()), (train, test));
    }

    #[rstest]
    fn split_is_a_seeded_permutation() {
        let samples = synthetic(50, 9);
        let (train_a, test_a) = split_samples(&samples, 0.2, 42);
        let (train_b, test_b) = split_samples(&samples, 0.2, 42);
        assert_eq!((&train_a, &test_a), (&train_b, &test_b));

        let mut rejoined: Vec<f64> = train_a
            .iter()
            .chain(&test_a)
            .map(LabeledSample::crowd_score)
            .collect();
        let mut original: Vec<f64> = samples.iter().map(LabeledSample::crowd_score).collect();
        rejoined.sort_by(f64::total_cmp);
        original.sort_by(f64::total_cmp);
        assert_eq!(rejoined, original);
    }

    #[rstest]
    fn reports_held_out_metrics() {
        let samples = synthetic(1_000, 42);
        let params = TrainParams {
            n_estimators: 40,
            ..TrainParams::default()
        };

        let (model, report) = train_from_samples(&samples, &params).expect("train");

        assert_eq!(report.train_count, 800);
        assert_eq!(report.test_count, 200);
        assert_eq!(report.tree_count, model.trees().len());
        assert!(report.metrics.r2 > 0.5, "r2 was {}", report.metrics.r2);
        assert!((report.metrics.rmse.powi(2) - report.metrics.mse).abs() < 1e-6);
    }

    #[rstest]
    fn a_single_sample_cannot_be_trained_on() {
        let samples = synthetic(1, 3);
        assert!(matches!(
            train_from_samples(&samples, &TrainParams::default()),
            Err(TrainingError::EmptyTrainingSet)
        ));
    }
}
