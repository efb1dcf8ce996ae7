//! Persist and summarise synthetic samples.
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufWriter, Write};

use camino::{Utf8Path, Utf8PathBuf};
use crowdcast_core::LabeledSample;
use serde::Serialize;

use crate::ExportError;

/// Aggregate statistics over a batch of samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of samples.
    pub count: usize,
    /// Mean crowd score, `0.0` for an empty batch.
    pub mean_score: f64,
    /// Lowest crowd score, `0.0` for an empty batch.
    pub min_score: f64,
    /// Highest crowd score, `0.0` for an empty batch.
    pub max_score: f64,
}

impl SampleSummary {
    /// Summarise `samples`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "summary statistics average scores over the sample count"
    )]
    #[must_use]
    pub fn of(samples: &[LabeledSample]) -> Self {
        if samples.is_empty() {
            return Self {
                count: 0,
                mean_score: 0.0,
                min_score: 0.0,
                max_score: 0.0,
            };
        }
        let scores = samples.iter().map(LabeledSample::crowd_score);
        let total: f64 = scores.clone().sum();
        let min_score = scores.clone().fold(f64::INFINITY, f64::min);
        let max_score = scores.fold(f64::NEG_INFINITY, f64::max);
        Self {
            count: samples.len(),
            mean_score: total / samples.len() as f64,
            min_score,
            max_score,
        }
    }
}

/// Write `samples` to `path` as JSON lines, one sample per line.
///
/// The parent directory is created when missing. Returns the number of
/// samples written.
///
/// # Errors
/// Returns [`ExportError`] when the directory or file cannot be created, or a
/// sample cannot be encoded or written.
pub fn write_samples_jsonl(
    path: &Utf8Path,
    samples: &[LabeledSample],
) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|source| {
            ExportError::CreateParent {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }
    let file = File::create(path.as_std_path()).map_err(|source| write_error(path, source))?;
    let mut writer = BufWriter::new(file);
    for (index, sample) in samples.iter().enumerate() {
        serde_json::to_writer(&mut writer, sample).map_err(|source| ExportError::Encode {
            path: path.to_path_buf(),
            index,
            source,
        })?;
        writer
            .write_all(b"\n")
            .map_err(|source| write_error(path, source))?;
    }
    writer.flush().map_err(|source| write_error(path, source))?;
    log::info!("wrote {} samples to {path}", samples.len());
    Ok(samples.len())
}

fn write_error(path: &Utf8Path, source: std::io::Error) -> ExportError {
    ExportError::WriteFile {
        path: Utf8PathBuf::from(path),
        source,
    }
}
