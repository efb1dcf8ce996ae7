//! Facade crate for the Crowdcast crowd estimation engine.
//!
//! This crate re-exports the core domain types and the synthesizer, and
//! exposes the model and scoring pipeline behind feature flags.

#![forbid(unsafe_code)]

pub use crowdcast_core::{
    CrowdLevel, FEATURE_COUNT, FeatureRow, FeatureVector, InferenceError, LabeledSample,
    PredictionRequest, PredictionResponse, Regressor, Season, Weather,
};
pub use crowdcast_data::{SynthesisRules, Synthesizer, generate};

#[cfg(feature = "model")]
pub use crowdcast_model::{
    ArtifactError, BoostedTrees, TrainParams, TrainingReport, load_model, save_model,
    train_from_samples,
};

#[cfg(feature = "scorer")]
pub use crowdcast_scorer::{
    ConfidencePolicy, FailureKind, HealthStatus, PipelineState, ScoringError, ScoringPipeline,
};
