//! Scoring pipeline turning prediction requests into crowd estimates.
//!
//! A [`ScoringPipeline`] is either backed by a trained regressor or serves
//! fallback scores drawn uniformly from `0..=100`. The state is chosen once,
//! when the pipeline is built, and never changes afterwards. Confidence is a
//! function of that state via [`ConfidencePolicy`].
//!
//! [`ScoringPipeline::predict`] never fails. Encoding repairs are logged at
//! debug level, and any inference failure is classified by [`FailureKind`],
//! logged, and replaced by [`PredictionResponse::neutral`] at a single
//! boundary.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use crowdcast_core::PredictionRequest;
//! use crowdcast_scorer::{ConfidencePolicy, ScoringPipeline};
//!
//! let pipeline = ScoringPipeline::load(
//!     Utf8Path::new("artifacts/model.bin"),
//!     ConfidencePolicy::default(),
//! );
//! let request = PredictionRequest::new(14, 5, true, false).with_weather("hot");
//! let response = pipeline.predict(&request);
//! println!("{} ({})", response.crowd_score, response.crowd_level);
//! ```
//!
//! [`PredictionResponse::neutral`]: crowdcast_core::PredictionResponse::neutral

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod confidence;
mod error;
mod health;
mod pipeline;

pub use confidence::{ConfidenceError, ConfidencePolicy};
pub use error::{FailureKind, ScoringError};
pub use health::HealthStatus;
pub use pipeline::{PipelineState, ScoringPipeline};

#[cfg(test)]
mod tests;
