//! Error types raised while training or persisting models.
#![forbid(unsafe_code)]

use camino::Utf8PathBuf;
use crowdcast_core::InferenceError;
use thiserror::Error;

/// Errors raised while fitting a model.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// No samples were available to fit on.
    #[error("cannot train on an empty sample set")]
    EmptyTrainingSet,
    /// The held-out split left no samples to evaluate on.
    #[error("test fraction {fraction} leaves no samples for evaluation")]
    EmptyTestSet {
        /// Requested test fraction.
        fraction: f64,
    },
    /// A hyperparameter is outside its valid range.
    #[error("invalid training parameter {name}: {reason}")]
    InvalidParams {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A freshly grown tree could not be evaluated.
    #[error("failed to evaluate a freshly grown tree")]
    Inference(#[from] InferenceError),
}

/// Errors raised while reading or writing a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Reading the artifact file failed.
    #[error("failed to read model artifact at {path}")]
    Read {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The artifact bytes are not a valid encoded model.
    #[error("failed to decode model artifact at {path}")]
    Decode {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The artifact was written by an incompatible format version.
    #[error("model artifact at {path} has format version {found}, expected {expected}")]
    Version {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Version stored in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },
    /// The artifact was trained on a different feature layout.
    #[error("model artifact at {path} expects {found} features, this build encodes {expected}")]
    FeatureCount {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Feature count stored in the file.
        found: u32,
        /// Feature count of [`crowdcast_core::FeatureRow`].
        expected: usize,
    },
    /// The decoded ensemble is structurally invalid.
    #[error("model artifact at {path} holds a malformed ensemble")]
    Malformed {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Structural problem found while validating the trees.
        #[source]
        source: InferenceError,
    },
    /// Creating the parent directory for the artifact failed.
    #[error("failed to create parent directory {path}")]
    CreateParent {
        /// Directory path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Creating or flushing the artifact file failed.
    #[error("failed to write model artifact at {path}")]
    Write {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Encoding the model with `bincode` failed.
    #[error("failed to serialise model into {path}")]
    Serialise {
        /// Artifact path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}
