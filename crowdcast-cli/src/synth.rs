//! `synth` command: write synthetic samples as JSON lines.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use crowdcast_core::LabeledSample;
use crowdcast_data::{DEFAULT_SAMPLE_COUNT, SampleSummary, generate, write_samples_jsonl};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::{ARG_OUTPUT, ARG_SAMPLES, ARG_SEED, CliError, ENV_SYNTH_OUTPUT, write_json};

/// CLI arguments for the `synth` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Draw synthetic crowd samples from the visitor heuristics and \
                 write them as JSON lines. Pass a seed for reproducible output.",
    about = "Generate synthetic training samples"
)]
#[ortho_config(prefix = "CROWDCAST")]
pub(crate) struct SynthArgs {
    /// Number of samples to draw (default 5000).
    #[arg(long = ARG_SAMPLES, value_name = "count")]
    #[serde(default)]
    pub(crate) samples: Option<usize>,
    /// Seed for reproducible output; omit for fresh randomness.
    #[arg(long = ARG_SEED, value_name = "seed")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Destination JSON lines file.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl SynthArgs {
    pub(crate) fn into_config(self) -> Result<SynthConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SynthConfig::try_from(merged)
    }
}

/// Resolved `synth` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SynthConfig {
    pub(crate) samples: usize,
    pub(crate) seed: Option<u64>,
    pub(crate) output: Utf8PathBuf,
}

impl TryFrom<SynthArgs> for SynthConfig {
    type Error = CliError;

    fn try_from(args: SynthArgs) -> Result<Self, Self::Error> {
        let output = args.output.ok_or(CliError::MissingArgument {
            field: ARG_OUTPUT,
            env: ENV_SYNTH_OUTPUT,
        })?;
        let samples = args.samples.unwrap_or(DEFAULT_SAMPLE_COUNT);
        if samples == 0 {
            return Err(CliError::InvalidArgument {
                field: ARG_SAMPLES,
                reason: "must be at least 1",
            });
        }
        Ok(Self {
            samples,
            seed: args.seed,
            output,
        })
    }
}

#[derive(Debug, Serialize)]
struct SynthReport<'a> {
    output: &'a Utf8PathBuf,
    #[serde(flatten)]
    summary: SampleSummary,
}

/// Draw `count` samples, seeded when `seed` is given.
pub(crate) fn draw_samples(count: usize, seed: Option<u64>) -> Vec<LabeledSample> {
    match seed {
        Some(value) => generate(count, &mut ChaCha8Rng::seed_from_u64(value)),
        None => generate(count, &mut rand::thread_rng()),
    }
}

pub(crate) fn run_synth(args: SynthArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    run_synth_with(&config, writer)
}

pub(crate) fn run_synth_with(config: &SynthConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    let samples = draw_samples(config.samples, config.seed);
    log::info!("synthesised {} samples", samples.len());
    write_samples_jsonl(&config.output, &samples)?;
    write_json(
        writer,
        &SynthReport {
            output: &config.output,
            summary: SampleSummary::of(&samples),
        },
    )
}
