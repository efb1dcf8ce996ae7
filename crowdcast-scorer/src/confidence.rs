//! Confidence reported alongside each score.
#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::HealthStatus;

/// Errors raised when building a [`ConfidencePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfidenceError {
    /// A confidence value was not finite or fell outside `0.0..=1.0`.
    #[error("{state} confidence {value} is outside 0.0..=1.0")]
    OutOfRange {
        /// Pipeline state the value belongs to.
        state: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Confidence attached to successful responses, per pipeline state.
///
/// Failure responses always carry confidence `0.0` regardless of policy.
///
/// Deserialisation goes through [`ConfidencePolicy::new`], so out-of-range
/// values are rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawConfidencePolicy")]
pub struct ConfidencePolicy {
    trained: f64,
    fallback: f64,
}

#[derive(Deserialize)]
struct RawConfidencePolicy {
    trained: f64,
    fallback: f64,
}

impl TryFrom<RawConfidencePolicy> for ConfidencePolicy {
    type Error = ConfidenceError;

    fn try_from(raw: RawConfidencePolicy) -> Result<Self, Self::Error> {
        Self::new(raw.trained, raw.fallback)
    }
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            trained: 0.85,
            fallback: 0.3,
        }
    }
}

impl ConfidencePolicy {
    /// Build a policy from per-state confidence values.
    ///
    /// # Errors
    /// Returns [`ConfidenceError::OutOfRange`] when either value is not a
    /// finite number in `0.0..=1.0`.
    ///
    /// # Examples
    /// ```
    /// use crowdcast_scorer::{ConfidencePolicy, HealthStatus};
    ///
    /// # fn main() -> Result<(), crowdcast_scorer::ConfidenceError> {
    /// let policy = ConfidencePolicy::new(0.9, 0.2)?;
    /// assert_eq!(policy.for_status(HealthStatus::Trained), 0.9);
    /// assert!(ConfidencePolicy::new(1.5, 0.2).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(trained: f64, fallback: f64) -> Result<Self, ConfidenceError> {
        check("trained", trained)?;
        check("fallback", fallback)?;
        Ok(Self { trained, fallback })
    }

    /// Confidence for a model-backed score.
    #[must_use]
    pub const fn trained(&self) -> f64 {
        self.trained
    }

    /// Confidence for a fallback score.
    #[must_use]
    pub const fn fallback(&self) -> f64 {
        self.fallback
    }

    /// Confidence for a successful response in `status`.
    #[must_use]
    pub const fn for_status(&self, status: HealthStatus) -> f64 {
        match status {
            HealthStatus::Trained => self.trained,
            HealthStatus::Fallback => self.fallback,
        }
    }
}

fn check(state: &'static str, value: f64) -> Result<(), ConfidenceError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfidenceError::OutOfRange { state, value })
    }
}
