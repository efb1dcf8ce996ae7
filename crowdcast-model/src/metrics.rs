//! Regression quality metrics.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Error measures of a model on held-out data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean squared error.
    pub mse: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Coefficient of determination.
    pub r2: f64,
}

impl RegressionMetrics {
    /// Compare `predicted` against `actual`.
    ///
    /// Returns `None` when the slices are empty or differ in length. When
    /// `actual` is constant, `r2` is `1.0` for a perfect fit and `0.0`
    /// otherwise.
    ///
    /// # Examples
    /// ```
    /// use crowdcast_model::RegressionMetrics;
    ///
    /// let metrics = RegressionMetrics::evaluate(&[1.0, 2.0, 3.0], &[1.0, 2.0, 4.0])
    ///     .expect("matching slices");
    /// assert!((metrics.mse - 1.0 / 3.0).abs() < 1e-12);
    /// assert!((metrics.r2 - 0.5).abs() < 1e-12);
    /// ```
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "metrics average squared errors over the sample count"
    )]
    #[must_use]
    pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Option<Self> {
        if actual.is_empty() || actual.len() != predicted.len() {
            return None;
        }
        let count = actual.len() as f64;
        let mean = actual.iter().sum::<f64>() / count;
        let residual_sum: f64 = actual
            .iter()
            .zip(predicted)
            .map(|(truth, guess)| (truth - guess).powi(2))
            .sum();
        let total_sum: f64 = actual.iter().map(|truth| (truth - mean).powi(2)).sum();
        let mse = residual_sum / count;
        let r2 = if total_sum > 0.0 {
            1.0 - residual_sum / total_sum
        } else if residual_sum > 0.0 {
            0.0
        } else {
            1.0
        };
        Some(Self {
            mse,
            rmse: mse.sqrt(),
            r2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn perfect_predictions_score_one() {
        let metrics = RegressionMetrics::evaluate(&[10.0, 20.0, 30.0], &[10.0, 20.0, 30.0])
            .expect("metrics");
        assert!(metrics.mse.abs() < f64::EPSILON);
        assert!((metrics.r2 - 1.0).abs() < f64::EPSILON);
    }

    #[rstest]
    fn predicting_the_mean_scores_zero() {
        let metrics =
            RegressionMetrics::evaluate(&[10.0, 20.0, 30.0], &[20.0, 20.0, 20.0]).expect("metrics");
        assert!(metrics.r2.abs() < 1e-12);
        assert!((metrics.rmse - (200.0_f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[rstest]
    #[case::constant_miss(&[5.0, 5.0], &[4.0, 6.0], 0.0)]
    #[case::constant_hit(&[5.0, 5.0], &[5.0, 5.0], 1.0)]
    fn constant_targets_do_not_divide_by_zero(
        #[case] actual: &[f64],
        #[case] predicted: &[f64],
        #[case] expected: f64,
    ) {
        let metrics = RegressionMetrics::evaluate(actual, predicted).expect("metrics");
        assert!((metrics.r2 - expected).abs() < f64::EPSILON);
    }

    #[rstest]
    fn mismatched_or_empty_slices_yield_nothing() {
        assert!(RegressionMetrics::evaluate(&[], &[]).is_none());
        assert!(RegressionMetrics::evaluate(&[1.0], &[1.0, 2.0]).is_none());
    }
}
