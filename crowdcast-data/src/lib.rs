//! Synthetic training data for the Crowdcast engine.
//!
//! No real visitor counts are ingested. Instead the [`Synthesizer`] encodes
//! domain heuristics into labelled samples: a base score of 50, adjusted for
//! peak and quiet hours, weekends, holidays, season and weather, perturbed by
//! Gaussian noise and clamped to `0..=100`. The training routine consumes
//! these samples; the distributional shape (means, effect magnitudes, clamp
//! bounds) is the contract, not bit-for-bit output.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use crowdcast_data::{generate, write_samples_jsonl};
//!
//! let samples = generate(5_000, &mut rand::thread_rng());
//! write_samples_jsonl(Utf8Path::new("artifacts/samples.jsonl"), &samples)
//!     .expect("persist samples");
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

use crowdcast_core::LabeledSample;
use rand::Rng;

mod error;
mod export;
mod rules;
mod synth;

pub use error::{ExportError, SynthesisError};
pub use export::{SampleSummary, write_samples_jsonl};
pub use rules::{EVENING_HOURS, PEAK_HOURS, QUIET_UNTIL, SynthesisRules};
pub use synth::{FIRST_WEEKEND_DAY, Synthesizer};

/// Sample count used by the reference training run.
pub const DEFAULT_SAMPLE_COUNT: usize = 5_000;

/// Draw exactly `n` samples using the default heuristics.
pub fn generate<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<LabeledSample> {
    Synthesizer::default().generate(n, rng)
}
