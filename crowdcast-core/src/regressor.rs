//! Inference seam between the scoring pipeline and a trained model.
//!
//! The `Regressor` trait maps feature rows to raw crowd scores. The scoring
//! pipeline owns clamping, classification and failure containment, so
//! implementations only report what the model produced.

use thiserror::Error;

use crate::FeatureRow;

/// Errors a regressor may raise while running inference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InferenceError {
    /// The input row does not fit the model.
    #[error("model expects {expected} features per row but received {actual}")]
    FeatureMismatch {
        /// Feature count the model was trained with.
        expected: usize,
        /// Feature count supplied by the caller.
        actual: usize,
    },
    /// The model failed for a reason specific to its implementation.
    #[error("inference failed: {message}")]
    Backend {
        /// Human-readable description from the model.
        message: String,
    },
}

/// Predict raw crowd scores for a batch of feature rows.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so a single loaded
/// model can serve concurrent requests without locking, and must return
/// exactly one value per input row. Output is not required to be clamped.
///
/// # Examples
///
/// ```rust
/// use crowdcast_core::{FeatureRow, InferenceError, Regressor};
///
/// struct HourRegressor;
///
/// impl Regressor for HourRegressor {
///     fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError> {
///         Ok(rows.iter().map(|row| f64::from(row[0]) * 4.0).collect())
///     }
/// }
///
/// let model = HourRegressor;
/// let scores = model.predict(&[[10.0, 0.0, 0.0, 0.0, 0.0, 0.0]]).unwrap();
/// assert_eq!(scores, vec![40.0]);
/// ```
pub trait Regressor: Send + Sync {
    /// Return one raw score per row in `rows`.
    ///
    /// # Errors
    /// Returns [`InferenceError`] when the model cannot evaluate the batch.
    fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, InferenceError>;

    /// Short identifier used in logs.
    fn name(&self) -> &'static str {
        "regressor"
    }
}
