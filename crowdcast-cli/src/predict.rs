//! `predict` and `health` commands backed by the scoring pipeline.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use crowdcast_core::PredictionRequest;
use crowdcast_scorer::{ConfidencePolicy, HealthStatus, ScoringPipeline};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_MODEL, ARG_REQUEST, CliError, DEFAULT_MODEL_PATH, ENV_PREDICT_REQUEST, write_json,
};

/// CLI arguments for the `predict` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score one prediction request given as JSON, for example \
                 '{\"hour\": 14, \"weekday\": 5, \"weekend\": true, \"holiday\": false}'. \
                 Without a usable model artifact, fallback scores are served.",
    about = "Score a JSON prediction request"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct PredictArgs {
    /// JSON-encoded prediction request.
    #[arg(value_name = "json")]
    #[serde(default)]
    pub(crate) request: Option<String>,
    /// Model artifact to serve (default artifacts/model.bin).
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
}

impl PredictArgs {
    pub(crate) fn into_config(self) -> Result<PredictConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PredictConfig::try_from(merged)
    }
}

/// Resolved `predict` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PredictConfig {
    pub(crate) request: PredictionRequest,
    pub(crate) model: Utf8PathBuf,
}

impl TryFrom<PredictArgs> for PredictConfig {
    type Error = CliError;

    fn try_from(args: PredictArgs) -> Result<Self, Self::Error> {
        let raw = args.request.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_PREDICT_REQUEST,
        })?;
        let request = serde_json::from_str(&raw).map_err(CliError::ParseRequest)?;
        Ok(Self {
            request,
            model: model_path(args.model),
        })
    }
}

/// CLI arguments for the `health` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Report whether a model artifact would be served")]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct HealthArgs {
    /// Model artifact to check (default artifacts/model.bin).
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
}

#[derive(Debug, Serialize)]
struct HealthReport {
    status: HealthStatus,
}

fn model_path(model: Option<Utf8PathBuf>) -> Utf8PathBuf {
    model.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MODEL_PATH))
}

pub(crate) fn run_predict(args: PredictArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_predict_with(&config, writer)
}

pub(crate) fn run_predict_with(
    config: &PredictConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let pipeline = ScoringPipeline::load(&config.model, ConfidencePolicy::default());
    write_json(writer, &pipeline.predict(&config.request))
}

pub(crate) fn run_health(args: HealthArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let pipeline = ScoringPipeline::load(&model_path(merged.model), ConfidencePolicy::default());
    write_json(
        writer,
        &HealthReport {
            status: pipeline.health(),
        },
    )
}
