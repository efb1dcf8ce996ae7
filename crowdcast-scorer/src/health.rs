//! Health reporting for a scoring pipeline.
#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which source produces scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Scores come from a loaded model.
    Trained,
    /// Scores are drawn at random because no model is loaded.
    Fallback,
}

impl HealthStatus {
    /// Lowercase label used in health reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trained => "trained",
            Self::Fallback => "fallback",
        }
    }

    /// Report whether scores come from a model.
    #[must_use]
    pub const fn is_model_backed(self) -> bool {
        matches!(self, Self::Trained)
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
