//! `train` command: fit a model on synthetic samples and save it.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use crowdcast_data::DEFAULT_SAMPLE_COUNT;
use crowdcast_model::{TrainParams, TrainingReport, save_model, train_from_samples};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::synth::draw_samples;
use crate::{
    ARG_LEARNING_RATE, ARG_MAX_DEPTH, ARG_MODEL, ARG_ROUNDS, ARG_SAMPLES, ARG_SEED, CliError,
    ENV_TRAIN_MODEL, write_json,
};

/// CLI arguments for the `train` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Synthesise samples, fit gradient-boosted trees on an 80/20 \
                 split and write the model artifact. Held-out metrics are \
                 printed as JSON.",
    about = "Train a model and save the artifact"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct TrainArgs {
    /// Number of synthetic samples to train on (default 5000).
    #[arg(long = ARG_SAMPLES, value_name = "count")]
    #[serde(default)]
    pub(crate) samples: Option<usize>,
    /// Seed for synthesis and the train/test split (default 42).
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Destination of the model artifact.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Number of boosting rounds (default 100).
    #[arg(long = ARG_ROUNDS, value_name = "count")]
    #[serde(default)]
    pub(crate) rounds: Option<usize>,
    /// Maximum tree depth (default 6).
    #[arg(long = ARG_MAX_DEPTH, value_name = "depth")]
    #[serde(default)]
    pub(crate) max_depth: Option<usize>,
    /// Learning rate (default 0.1).
    #[arg(long = ARG_LEARNING_RATE, value_name = "rate")]
    #[serde(default)]
    pub(crate) learning_rate: Option<f64>,
}

impl TrainArgs {
    pub(crate) fn into_config(self) -> Result<TrainConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        TrainConfig::try_from(merged)
    }
}

/// Resolved `train` configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TrainConfig {
    pub(crate) samples: usize,
    pub(crate) model: Utf8PathBuf,
    pub(crate) params: TrainParams,
}

impl TryFrom<TrainArgs> for TrainConfig {
    type Error = CliError;

    fn try_from(args: TrainArgs) -> Result<Self, Self::Error> {
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_TRAIN_MODEL,
        })?;
        let samples = args.samples.unwrap_or(DEFAULT_SAMPLE_COUNT);
        if samples == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_SAMPLES,
                reason: "must be at least 1",
            });
        }
        let defaults = TrainParams::default();
        let params = TrainParams {
            n_estimators: args.rounds.unwrap_or(defaults.n_estimators),
            max_depth: args.max_depth.unwrap_or(defaults.max_depth),
            learning_rate: args.learning_rate.unwrap_or(defaults.learning_rate),
            seed: args.seed.unwrap_or(defaults.seed),
            ..defaults
        }
        .validate()?;
        Ok(Self {
            samples,
            model,
            params,
        })
    }
}

#[derive(Debug, Serialize)]
struct TrainOutput<'a> {
    model: &'a Utf8PathBuf,
    #[serde(flatten)]
    report: TrainingReport,
}

pub(crate) fn run_train(args: TrainArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_train_with(&config, writer)
}

pub(crate) fn run_train_with(config: &TrainConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let samples = draw_samples(config.samples, Some(config.params.seed));
    let (model, report) = train_from_samples(&samples, &config.params)?;
    save_model(&config.model, &model)?;
    write_json(
        writer,
        &TrainOutput {
            model: &config.model,
            report,
        },
    )
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<TrainConfig, CliError> {
    let merged = TrainArgs::merge_from_layers(layers).map_err(CliError::from)?;
    TrainConfig::try_from(merged)
}
