//! Failures contained by the scoring boundary.
#![forbid(unsafe_code)]

use std::fmt;

use crowdcast_core::InferenceError;
use thiserror::Error;

/// Coarse classification of a scoring failure, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The regressor raised an error.
    Inference,
    /// The regressor produced NaN or an infinity.
    NonFinite,
    /// The regressor returned the wrong number of scores.
    Shape,
    /// The regressor panicked.
    Panic,
}

impl FailureKind {
    /// Short label for log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inference => "inference",
            Self::NonFinite => "non-finite",
            Self::Shape => "shape",
            Self::Panic => "panic",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while scoring a single request.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The regressor could not evaluate the request.
    #[error("regressor failed")]
    Inference(#[from] InferenceError),
    /// The regressor output was not a finite number.
    #[error("regressor produced non-finite score {raw}")]
    NonFiniteScore {
        /// Value returned by the regressor.
        raw: f64,
    },
    /// The regressor returned a batch of the wrong size.
    #[error("regressor returned {actual} scores for {expected} rows")]
    OutputShape {
        /// Rows submitted.
        expected: usize,
        /// Scores returned.
        actual: usize,
    },
    /// The regressor panicked while evaluating the request.
    #[error("regressor panicked: {message}")]
    RegressorPanicked {
        /// Panic payload, when it was a string.
        message: String,
    },
}

impl ScoringError {
    /// Classify the failure.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Inference(_) => FailureKind::Inference,
            Self::NonFiniteScore { .. } => FailureKind::NonFinite,
            Self::OutputShape { .. } => FailureKind::Shape,
            Self::RegressorPanicked { .. } => FailureKind::Panic,
        }
    }
}
