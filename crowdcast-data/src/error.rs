//! Error types raised while synthesising or exporting samples.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised when configuring the synthesizer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    /// The holiday probability was outside `0.0..=1.0`.
    #[error("holiday probability {value} is outside 0.0..=1.0")]
    InvalidProbability {
        /// Rejected probability.
        value: f64,
    },
    /// The noise standard deviation was negative or not finite.
    #[error("noise standard deviation {value} must be finite and non-negative")]
    InvalidNoise {
        /// Rejected standard deviation.
        value: f64,
    },
    /// A heuristic effect was not finite.
    #[error("effect {name} must be finite")]
    NonFiniteEffect {
        /// Name of the offending rule field.
        name: &'static str,
    },
}

/// Errors raised while writing samples to disk.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Creating the parent directory for the output file failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Writing the sample file failed.
    #[error("failed to write samples to {path}")]
    WriteFile {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Encoding a sample as JSON failed.
    #[error("failed to encode sample {index} for {path}")]
    Encode {
        /// Target file path.
        path: Utf8PathBuf,
        /// Position of the sample in the batch.
        index: usize,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
}
