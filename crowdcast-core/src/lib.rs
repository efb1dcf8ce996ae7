//! Core domain types for the Crowdcast engine.
//!
//! The crate fixes the contract shared by the synthesizer, the training
//! routine and the scoring pipeline:
//! - [`Season`] and [`Weather`] own the single categorical encoding used on
//!   both sides of the model, so training and inference cannot drift apart.
//! - [`FeatureVector`] is the fixed-order regressor input and
//!   [`LabeledSample`] pairs it with a synthetic crowd score.
//! - [`PredictionRequest`] and [`PredictionResponse`] describe the
//!   request/response contract, with [`encode_request`] mapping one onto a
//!   feature vector without ever failing.
//! - [`Regressor`] is the seam between the pipeline and a trained model.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod category;
mod encode;
mod features;
mod level;
mod regressor;
mod request;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::{Season, Weather};
pub use encode::{EncodedRequest, EncodingAnomaly, encode_request};
pub use features::{
    FEATURE_COUNT, FeatureError, FeatureRow, FeatureVector, LabeledSample, MAX_HOUR, MAX_WEEKDAY,
};
pub use level::CrowdLevel;
pub use regressor::{InferenceError, Regressor};
pub use request::{PredictionRequest, PredictionResponse};

/// Lowest crowd score any component may report.
pub const MIN_CROWD_SCORE: f64 = 0.0;

/// Highest crowd score any component may report.
pub const MAX_CROWD_SCORE: f64 = 100.0;

/// Clamp a raw crowd score into `MIN_CROWD_SCORE..=MAX_CROWD_SCORE`.
///
/// Returns `None` for non-finite input so callers decide how to recover.
///
/// # Examples
/// ```
/// use crowdcast_core::clamp_score;
///
/// assert_eq!(clamp_score(120.5), Some(100.0));
/// assert_eq!(clamp_score(-3.0), Some(0.0));
/// assert_eq!(clamp_score(f64::NAN), None);
/// ```
#[must_use]
pub fn clamp_score(raw: f64) -> Option<f64> {
    raw.is_finite()
        .then(|| raw.clamp(MIN_CROWD_SCORE, MAX_CROWD_SCORE))
}
