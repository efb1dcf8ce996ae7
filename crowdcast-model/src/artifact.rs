//! Versioned `bincode` persistence for trained ensembles.
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::{BufWriter, Write};

use bincode::Options;
use camino::{Utf8Path, Utf8PathBuf};
use crowdcast_core::FEATURE_COUNT;
use serde::{Deserialize, Serialize};

use crate::{ArtifactError, BoostedTrees};

/// Artifact layout version written by this build.
pub const FORMAT_VERSION: u32 = 1;

/// Upper bound on decoded artifact size, in bytes.
const MAX_ARTIFACT_BYTES: u64 = 64 * 1024 * 1024;

/// On-disk envelope around a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Layout version, compared against [`FORMAT_VERSION`] on load.
    pub format_version: u32,
    /// Feature count the model was trained on.
    pub feature_count: u32,
    /// The trained ensemble.
    pub model: BoostedTrees,
}

impl ModelArtifact {
    /// Wrap `model` for the current format and feature layout.
    #[must_use]
    pub fn new(model: BoostedTrees) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            feature_count: u32::try_from(FEATURE_COUNT).unwrap_or(u32::MAX),
            model,
        }
    }
}

/// `bincode` configuration used for model artifacts.
#[must_use]
pub fn model_bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_limit(MAX_ARTIFACT_BYTES)
}

/// Write `model` to `path`, creating the parent directory when missing.
///
/// # Errors
/// Returns [`ArtifactError`] when the directory or file cannot be created or
/// the model cannot be serialised.
pub fn save_model(path: &Utf8Path, model: &BoostedTrees) -> Result<(), ArtifactError> {
    if let Some(parent) = path.parent().filter(|dir| !dir.as_str().is_empty()) {
        std::fs::create_dir_all(parent.as_std_path()).map_err(|source| {
            ArtifactError::CreateParent {
                path: parent.to_path_buf(),
                source,
            }
        })?;
    }
    let file = File::create(path.as_std_path()).map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    model_bincode_options()
        .serialize_into(&mut writer, &ModelArtifact::new(model.clone()))
        .map_err(|source| ArtifactError::Serialise {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|source| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "wrote model with {} trees to {path}",
        model.trees().len()
    );
    Ok(())
}

/// Read and validate a model artifact from `path`.
///
/// # Errors
/// Returns [`ArtifactError::Read`] when the file cannot be read,
/// [`ArtifactError::Decode`] for bytes that are not an artifact,
/// [`ArtifactError::Version`] or [`ArtifactError::FeatureCount`] for
/// incompatible artifacts, and [`ArtifactError::Malformed`] when the decoded
/// trees are structurally invalid.
pub fn load_model(path: &Utf8Path) -> Result<BoostedTrees, ArtifactError> {
    let bytes = std::fs::read(path.as_std_path()).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: ModelArtifact =
        model_bincode_options()
            .deserialize(&bytes)
            .map_err(|source| ArtifactError::Decode {
                path: path.to_path_buf(),
                source,
            })?;
    check_artifact(path, &artifact)?;
    log::debug!(
        "loaded model with {} trees from {path}",
        artifact.model.trees().len()
    );
    Ok(artifact.model)
}

fn check_artifact(path: &Utf8Path, artifact: &ModelArtifact) -> Result<(), ArtifactError> {
    let owned = || Utf8PathBuf::from(path);
    if artifact.format_version != FORMAT_VERSION {
        return Err(ArtifactError::Version {
            path: owned(),
            found: artifact.format_version,
            expected: FORMAT_VERSION,
        });
    }
    if usize::try_from(artifact.feature_count).ok() != Some(FEATURE_COUNT) {
        return Err(ArtifactError::FeatureCount {
            path: owned(),
            found: artifact.feature_count,
            expected: FEATURE_COUNT,
        });
    }
    artifact
        .model
        .validate()
        .map_err(|source| ArtifactError::Malformed {
            path: owned(),
            source,
        })
}
