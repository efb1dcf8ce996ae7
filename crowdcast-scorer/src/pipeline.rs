//! The two-state scoring pipeline.
#![forbid(unsafe_code)]

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use camino::Utf8Path;
use crowdcast_core::{
    FeatureVector, MAX_CROWD_SCORE, MIN_CROWD_SCORE, PredictionRequest, PredictionResponse,
    Regressor, clamp_score, encode_request,
};
use crowdcast_model::load_model;
use rand::Rng;

use crate::{ConfidencePolicy, HealthStatus, ScoringError};

/// Source of scores, fixed when the pipeline is built.
#[derive(Clone)]
pub enum PipelineState {
    /// A loaded regressor, shared read-only across clones.
    Trained(Arc<dyn Regressor>),
    /// No model: scores are drawn uniformly from `0..=100`.
    Fallback,
}

impl fmt::Debug for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trained(regressor) => f.debug_tuple("Trained").field(&regressor.name()).finish(),
            Self::Fallback => f.write_str("Fallback"),
        }
    }
}

/// Scores prediction requests using a trained model or random fallback.
///
/// The pipeline holds no mutable state, so one instance (or cheap clones of
/// it) can serve concurrent callers.
///
/// # Examples
/// ```
/// use crowdcast_core::{CrowdLevel, PredictionRequest};
/// use crowdcast_scorer::{ConfidencePolicy, HealthStatus, ScoringPipeline};
///
/// let pipeline = ScoringPipeline::fallback(ConfidencePolicy::default());
/// let response = pipeline.predict(&PredictionRequest::new(9, 2, false, false));
///
/// assert_eq!(pipeline.health(), HealthStatus::Fallback);
/// assert!((0.0..=100.0).contains(&response.crowd_score));
/// assert_eq!(response.crowd_level, CrowdLevel::from_score(response.crowd_score));
/// assert_eq!(response.confidence, 0.3);
/// ```
#[derive(Debug, Clone)]
pub struct ScoringPipeline {
    state: PipelineState,
    confidence: ConfidencePolicy,
}

impl ScoringPipeline {
    /// Load the model artifact at `path`, falling back when it is unusable.
    ///
    /// A missing, unreadable, corrupt or incompatible artifact is logged once
    /// as a warning and yields a fallback pipeline; this never fails.
    #[must_use]
    pub fn load(path: &Utf8Path, confidence: ConfidencePolicy) -> Self {
        match load_model(path) {
            Ok(model) => {
                log::info!(
                    "serving model from {path} ({} trees)",
                    model.trees().len()
                );
                Self::trained(model, confidence)
            }
            Err(err) => {
                log::warn!("{}; serving fallback scores", error_chain(&err));
                Self::fallback(confidence)
            }
        }
    }

    /// Build a pipeline backed by `regressor`.
    #[must_use]
    pub fn trained(regressor: impl Regressor + 'static, confidence: ConfidencePolicy) -> Self {
        Self::shared(Arc::new(regressor), confidence)
    }

    /// Build a pipeline backed by an already shared regressor.
    #[must_use]
    pub fn shared(regressor: Arc<dyn Regressor>, confidence: ConfidencePolicy) -> Self {
        Self {
            state: PipelineState::Trained(regressor),
            confidence,
        }
    }

    /// Build a pipeline that serves random fallback scores.
    #[must_use]
    pub const fn fallback(confidence: ConfidencePolicy) -> Self {
        Self {
            state: PipelineState::Fallback,
            confidence,
        }
    }

    /// Current score source.
    #[must_use]
    pub const fn state(&self) -> &PipelineState {
        &self.state
    }

    /// Confidence policy applied to successful responses.
    #[must_use]
    pub const fn confidence_policy(&self) -> ConfidencePolicy {
        self.confidence
    }

    /// Report which source produces scores.
    #[must_use]
    pub const fn health(&self) -> HealthStatus {
        match self.state {
            PipelineState::Trained(_) => HealthStatus::Trained,
            PipelineState::Fallback => HealthStatus::Fallback,
        }
    }

    /// Score `request` using thread-local randomness for fallback draws.
    #[must_use]
    pub fn predict(&self, request: &PredictionRequest) -> PredictionResponse {
        self.predict_with_rng(request, &mut rand::thread_rng())
    }

    /// Score `request`, drawing fallback scores from `rng`.
    ///
    /// Failures are logged with their [`crate::FailureKind`] and replaced by
    /// the neutral response.
    pub fn predict_with_rng<R: Rng + ?Sized>(
        &self,
        request: &PredictionRequest,
        rng: &mut R,
    ) -> PredictionResponse {
        self.try_predict(request, rng).unwrap_or_else(|err| {
            log::error!(
                "{} failure while scoring: {}; returning neutral response",
                err.kind(),
                error_chain(&err)
            );
            PredictionResponse::neutral()
        })
    }

    /// Score `request` without containing failures.
    ///
    /// # Errors
    /// Returns [`ScoringError`] when the regressor fails or panics, returns a
    /// batch of the wrong size, or produces a non-finite score. Fallback
    /// scoring never fails.
    pub fn try_predict<R: Rng + ?Sized>(
        &self,
        request: &PredictionRequest,
        rng: &mut R,
    ) -> Result<PredictionResponse, ScoringError> {
        let encoded = encode_request(request);
        for anomaly in &encoded.anomalies {
            log::debug!("repaired request field: {anomaly}");
        }
        let score = match &self.state {
            PipelineState::Fallback => rng.gen_range(MIN_CROWD_SCORE..=MAX_CROWD_SCORE),
            PipelineState::Trained(regressor) => {
                let raw = infer(regressor.as_ref(), &encoded.features)?;
                clamp_score(raw).ok_or(ScoringError::NonFiniteScore { raw })?
            }
        };
        Ok(PredictionResponse::from_score(
            score,
            self.confidence.for_status(self.health()),
        ))
    }
}

fn infer(regressor: &dyn Regressor, features: &FeatureVector) -> Result<f64, ScoringError> {
    let rows = [features.to_row()];
    let scores = panic::catch_unwind(AssertUnwindSafe(|| regressor.predict(&rows)))
        .map_err(|payload| ScoringError::RegressorPanicked {
            message: panic_message(payload.as_ref()),
        })??;
    match scores.as_slice() {
        [raw] => Ok(*raw),
        other => Err(ScoringError::OutputShape {
            expected: 1,
            actual: other.len(),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_owned())
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
