//! Command-line interface for the Crowdcast engine.
//!
//! Subcommands cover the offline workflow end to end:
//! - `synth` writes synthetic samples as JSON lines;
//! - `train` fits a model on fresh samples and writes the artifact;
//! - `predict` scores one JSON request;
//! - `health` reports whether an artifact would be served.
//!
//! Options layer CLI flags over `CROWDCAST_*` environment variables and
//! configuration files via `ortho_config`.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod predict;
mod synth;
mod train;

pub use error::CliError;

use predict::{HealthArgs, PredictArgs, run_health, run_predict};
use synth::{SynthArgs, run_synth};
use train::{TrainArgs, run_train};

pub(crate) const ARG_SAMPLES: &str = "samples";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_OUTPUT: &str = "output";
pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_ROUNDS: &str = "rounds";
pub(crate) const ARG_MAX_DEPTH: &str = "max-depth";
pub(crate) const ARG_LEARNING_RATE: &str = "learning-rate";
pub(crate) const ENV_SYNTH_OUTPUT: &str = "CROWDCAST_CMDS_SYNTH_OUTPUT";
pub(crate) const ENV_TRAIN_MODEL: &str = "CROWDCAST_CMDS_TRAIN_MODEL";
pub(crate) const ENV_PREDICT_REQUEST: &str = "CROWDCAST_CMDS_PREDICT_REQUEST";

/// Artifact location used by `predict` and `health` when none is given.
pub const DEFAULT_MODEL_PATH: &str = "artifacts/model.bin";

/// Run the Crowdcast CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration merging or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_command(cli.command, &mut stdout)
}

fn run_command(command: Command, writer: &mut dyn Write) -> Result<(), CliError> {
    match command {
        Command::Synth(args) => run_synth(args, writer),
        Command::Train(args) => run_train(args, writer),
        Command::Predict(args) => run_predict(args, writer),
        Command::Health(args) => run_health(args, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "crowdcast",
    about = "Synthesise data, train and query the Crowdcast crowd-score model",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate synthetic training samples.
    Synth(SynthArgs),
    /// Train a model on synthetic samples and save the artifact.
    Train(TrainArgs),
    /// Score a single JSON prediction request.
    Predict(PredictArgs),
    /// Report whether a model artifact would be served.
    Health(HealthArgs),
}

/// Write `value` to `writer` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
