//! Discrete crowd levels derived from a continuous crowd score.

use serde::{Deserialize, Serialize};

/// Upper bound (inclusive) of the [`CrowdLevel::Low`] bracket.
pub const LOW_UPPER: f64 = 25.0;
/// Upper bound (inclusive) of the [`CrowdLevel::Medium`] bracket.
pub const MEDIUM_UPPER: f64 = 50.0;
/// Upper bound (inclusive) of the [`CrowdLevel::High`] bracket.
pub const HIGH_UPPER: f64 = 75.0;

/// How busy a location is expected to be.
///
/// Brackets are inclusive on their upper bound: `25.0` is still
/// [`CrowdLevel::Low`] while `25.0001` is [`CrowdLevel::Medium`].
///
/// # Examples
/// ```
/// use crowdcast_core::CrowdLevel;
///
/// assert_eq!(CrowdLevel::from_score(25.0), CrowdLevel::Low);
/// assert_eq!(CrowdLevel::from_score(75.0001), CrowdLevel::VeryHigh);
/// assert_eq!(CrowdLevel::VeryHigh.to_string(), "Very High");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CrowdLevel {
    /// Score in `0..=25`.
    Low,
    /// Score in `(25, 50]`.
    Medium,
    /// Score in `(50, 75]`.
    High,
    /// Score above `75`.
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl CrowdLevel {
    /// Classify a score that has already been clamped to `0..=100`.
    ///
    /// Non-finite input is treated as the top bracket; the scoring pipeline
    /// rejects such scores before classification.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score <= LOW_UPPER {
            Self::Low
        } else if score <= MEDIUM_UPPER {
            Self::Medium
        } else if score <= HIGH_UPPER {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    /// Return the wire label of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::VeryHigh => "Very High",
        }
    }
}

impl std::fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
