//! Unit tests for the scoring pipeline.

use std::sync::Arc;

use camino::Utf8PathBuf;
use crowdcast_core::test_support::{
    ConstantRegressor, EmptyRegressor, FailingRegressor, HourRegressor, PanickingRegressor,
};
use crowdcast_core::{CrowdLevel, PredictionRequest, PredictionResponse, Regressor};
use crowdcast_data::Synthesizer;
use crowdcast_model::{BoostedTrees, TrainParams, save_model};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use crate::{
    ConfidencePolicy, FailureKind, HealthStatus, PipelineState, ScoringError, ScoringPipeline,
};

#[fixture]
fn request() -> PredictionRequest {
    PredictionRequest::new(14, 5, true, false)
        .with_season("summer")
        .with_weather("hot")
}

#[fixture]
fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(42)
}

fn temp_path(dir: &TempDir, name: &str) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(dir.path().join(name)).expect("utf8 path")
}

#[rstest]
#[case(20.0, 20.0, CrowdLevel::Low)]
#[case(25.0, 25.0, CrowdLevel::Low)]
#[case(42.0, 42.0, CrowdLevel::Medium)]
#[case(75.0, 75.0, CrowdLevel::High)]
#[case(88.5, 88.5, CrowdLevel::VeryHigh)]
#[case(180.0, 100.0, CrowdLevel::VeryHigh)]
#[case(-12.0, 0.0, CrowdLevel::Low)]
fn trained_scores_are_clamped_and_classified(
    request: PredictionRequest,
    mut rng: ChaCha8Rng,
    #[case] raw: f64,
    #[case] score: f64,
    #[case] level: CrowdLevel,
) {
    let pipeline = ScoringPipeline::trained(ConstantRegressor(raw), ConfidencePolicy::default());

    let response = pipeline.try_predict(&request, &mut rng).expect("score");

    assert!((response.crowd_score - score).abs() < f64::EPSILON);
    assert_eq!(response.crowd_level, level);
    assert!((response.confidence - 0.85).abs() < f64::EPSILON);
}

#[rstest]
fn encoding_repairs_reach_the_regressor(mut rng: ChaCha8Rng) {
    let pipeline = ScoringPipeline::trained(HourRegressor, ConfidencePolicy::default());
    let request = PredictionRequest::new(99, -4, false, false)
        .with_season("monsoon")
        .with_weather("fog");

    let response = pipeline.try_predict(&request, &mut rng).expect("score");

    // hour clamps to 23, and 23 * 4 = 92
    assert!((response.crowd_score - 92.0).abs() < f64::EPSILON);
    assert_eq!(response.crowd_level, CrowdLevel::VeryHigh);
}

#[rstest]
#[case::inference(
    ScoringPipeline::trained(FailingRegressor, ConfidencePolicy::default()),
    FailureKind::Inference
)]
#[case::shape(
    ScoringPipeline::trained(EmptyRegressor, ConfidencePolicy::default()),
    FailureKind::Shape
)]
#[case::nan(
    ScoringPipeline::trained(ConstantRegressor(f64::NAN), ConfidencePolicy::default()),
    FailureKind::NonFinite
)]
#[case::infinite(
    ScoringPipeline::trained(ConstantRegressor(f64::INFINITY), ConfidencePolicy::default()),
    FailureKind::NonFinite
)]
#[case::panic(
    ScoringPipeline::trained(PanickingRegressor, ConfidencePolicy::default()),
    FailureKind::Panic
)]
fn failures_are_classified_and_neutralised(
    request: PredictionRequest,
    mut rng: ChaCha8Rng,
    #[case] pipeline: ScoringPipeline,
    #[case] kind: FailureKind,
) {
    let error = pipeline
        .try_predict(&request, &mut rng)
        .expect_err("scoring should fail");
    assert_eq!(error.kind(), kind);

    let response = pipeline.predict_with_rng(&request, &mut rng);
    assert_eq!(response, PredictionResponse::neutral());
    assert_eq!(pipeline.predict(&request), PredictionResponse::neutral());
}

#[rstest]
fn panics_keep_their_message(request: PredictionRequest, mut rng: ChaCha8Rng) {
    let pipeline = ScoringPipeline::trained(PanickingRegressor, ConfidencePolicy::default());
    assert_eq!(
        pipeline.try_predict(&request, &mut rng),
        Err(ScoringError::RegressorPanicked {
            message: "simulated regressor panic".to_owned()
        })
    );
}

#[rstest]
fn shape_errors_report_counts(request: PredictionRequest, mut rng: ChaCha8Rng) {
    let pipeline = ScoringPipeline::trained(EmptyRegressor, ConfidencePolicy::default());
    assert_eq!(
        pipeline.try_predict(&request, &mut rng),
        Err(ScoringError::OutputShape {
            expected: 1,
            actual: 0
        })
    );
}

#[rstest]
fn fallback_draws_follow_the_rng(request: PredictionRequest) {
    let pipeline = ScoringPipeline::fallback(ConfidencePolicy::default());
    let first = pipeline.predict_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(3));
    let second = pipeline.predict_with_rng(&request, &mut ChaCha8Rng::seed_from_u64(3));

    assert_eq!(first, second);
    assert!((first.confidence - 0.3).abs() < f64::EPSILON);
    assert_eq!(first.crowd_level, CrowdLevel::from_score(first.crowd_score));
}

#[rstest]
fn trained_scores_are_deterministic(request: PredictionRequest) {
    let pipeline = ScoringPipeline::trained(HourRegressor, ConfidencePolicy::default());
    let first = pipeline.predict(&request);
    let second = pipeline.predict(&request);
    assert_eq!(first, second);
}

#[rstest]
fn custom_policy_sets_confidence(request: PredictionRequest, mut rng: ChaCha8Rng) {
    let policy = ConfidencePolicy::new(0.6, 0.1).expect("valid policy");
    let trained = ScoringPipeline::trained(ConstantRegressor(40.0), policy);
    let fallback = ScoringPipeline::fallback(policy);

    let trained_response = trained.try_predict(&request, &mut rng).expect("score");
    let fallback_response = fallback.try_predict(&request, &mut rng).expect("score");

    assert!((trained_response.confidence - 0.6).abs() < f64::EPSILON);
    assert!((fallback_response.confidence - 0.1).abs() < f64::EPSILON);
    assert_eq!(trained.confidence_policy(), policy);
}

#[rstest]
fn health_reflects_the_state() {
    let trained = ScoringPipeline::trained(HourRegressor, ConfidencePolicy::default());
    let fallback = ScoringPipeline::fallback(ConfidencePolicy::default());

    assert_eq!(trained.health(), HealthStatus::Trained);
    assert!(trained.health().is_model_backed());
    assert!(matches!(trained.state(), PipelineState::Trained(_)));
    assert_eq!(fallback.health(), HealthStatus::Fallback);
    assert!(!fallback.health().is_model_backed());
    assert_eq!(fallback.health().as_str(), "fallback");
}

#[rstest]
fn clones_share_the_regressor() {
    let regressor: Arc<dyn Regressor> = Arc::new(HourRegressor);
    let pipeline = ScoringPipeline::shared(Arc::clone(&regressor), ConfidencePolicy::default());
    let clone = pipeline.clone();

    assert_eq!(Arc::strong_count(&regressor), 3);
    assert_eq!(format!("{:?}", clone.state()), "Trained(\"hour\")");
}

#[rstest]
fn pipeline_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync + Clone + 'static>() {}
    assert_send_sync::<ScoringPipeline>();
}

#[rstest]
fn missing_artifact_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = ScoringPipeline::load(&temp_path(&dir, "absent.bin"), ConfidencePolicy::default());
    assert_eq!(pipeline.health(), HealthStatus::Fallback);
}

#[rstest]
fn corrupt_artifact_falls_back() {
    let dir = TempDir::new().expect("tempdir");
    let path = temp_path(&dir, "model.bin");
    std::fs::write(path.as_std_path(), [0xff_u8; 32]).expect("write garbage");

    let pipeline = ScoringPipeline::load(&path, ConfidencePolicy::default());

    assert_eq!(pipeline.health(), HealthStatus::Fallback);
}

#[rstest]
fn saved_artifact_loads_as_trained(request: PredictionRequest, mut rng: ChaCha8Rng) {
    let dir = TempDir::new().expect("tempdir");
    let path = temp_path(&dir, "model.bin");
    let samples = Synthesizer::default().generate(300, &mut ChaCha8Rng::seed_from_u64(8));
    let params = TrainParams {
        n_estimators: 10,
        max_depth: 3,
        ..TrainParams::default()
    };
    let model = BoostedTrees::fit(&samples, &params).expect("fit");
    save_model(&path, &model).expect("save");

    let pipeline = ScoringPipeline::load(&path, ConfidencePolicy::default());
    let response = pipeline.try_predict(&request, &mut rng).expect("score");

    assert_eq!(pipeline.health(), HealthStatus::Trained);
    assert!((0.0..=100.0).contains(&response.crowd_score));
    assert!((response.confidence - 0.85).abs() < f64::EPSILON);
}
