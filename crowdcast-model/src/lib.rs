//! Gradient-boosted regression trees for crowd score prediction.
//!
//! This crate turns synthetic samples into a [`BoostedTrees`] ensemble,
//! evaluates it on a held-out split and persists it as a versioned
//! [`ModelArtifact`] using `bincode`. The ensemble implements
//! [`crowdcast_core::Regressor`], so the scoring pipeline can serve it
//! without knowing how it was trained.
//!
//! Training is single-threaded and deterministic for a fixed seed: the
//! train/test split shuffles with `ChaCha8Rng` and tree growth contains no
//! randomness.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use crowdcast_model::{TrainParams, save_model, train_from_samples};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let samples = Vec::new();
//! let (model, report) = train_from_samples(&samples, &TrainParams::default())?;
//! println!("held-out r2 = {:.3}", report.metrics.r2);
//! save_model(Utf8Path::new("artifacts/model.bin"), &model)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod artifact;
mod boosted;
mod error;
mod grow;
mod metrics;
mod params;
mod train;
mod tree;

pub use artifact::{FORMAT_VERSION, ModelArtifact, load_model, model_bincode_options, save_model};
pub use boosted::BoostedTrees;
pub use error::{ArtifactError, TrainingError};
pub use metrics::RegressionMetrics;
pub use params::TrainParams;
pub use train::{TrainingReport, split_samples, train_from_samples};
pub use tree::{Node, RegressionTree};
