//! Failures surfaced by `crowdcast` subcommands.
//!
//! Scoring itself never fails; these cover argument and configuration
//! problems plus the file operations behind `synth` and `train`.

use std::sync::Arc;

use crowdcast_data::ExportError;
use crowdcast_model::{ArtifactError, TrainingError};
use thiserror::Error;

/// Errors emitted by the Crowdcast CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// An option was present but unusable.
    #[error("invalid --{field}: {reason}")]
    InvalidArgument {
        /// Name of the offending option.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// Writing synthetic samples failed.
    #[error("failed to export samples: {0}")]
    ExportSamples(#[from] ExportError),
    /// Fitting the model failed.
    #[error("failed to train model: {0}")]
    Training(#[from] TrainingError),
    /// Writing the model artifact failed.
    #[error("failed to save model: {0}")]
    SaveModel(#[from] ArtifactError),
    /// The prediction request was not valid JSON for the request contract.
    #[error("failed to parse prediction request JSON: {0}")]
    ParseRequest(#[source] serde_json::Error),
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
