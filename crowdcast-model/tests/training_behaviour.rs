//! Behavioural coverage for model training and artifact persistence.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use crowdcast_core::{FeatureRow, LabeledSample, Regressor};
use crowdcast_data::Synthesizer;
use crowdcast_model::{
    ArtifactError, BoostedTrees, TrainParams, TrainingReport, load_model, save_model,
    train_from_samples,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

/// Temporary directory for artifacts written by a scenario.
#[fixture]
pub fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("create temporary directory: {err}"),
    }
}

/// Synthetic samples the scenario trains on.
#[fixture]
pub fn samples() -> RefCell<Vec<LabeledSample>> {
    RefCell::new(Vec::new())
}

/// Model and report produced by training.
#[fixture]
pub fn trained() -> RefCell<Option<(BoostedTrees, TrainingReport)>> {
    RefCell::new(None)
}

/// Outcome of loading the artifact back from disk.
#[fixture]
pub fn reloaded() -> RefCell<Option<Result<BoostedTrees, ArtifactError>>> {
    RefCell::new(None)
}

fn artifact_path(temp_dir: &TempDir) -> Utf8PathBuf {
    match Utf8PathBuf::from_path_buf(temp_dir.path().join("model.bin")) {
        Ok(path) => path,
        Err(path) => panic!("temporary path is not UTF-8: {}", path.display()),
    }
}

fn probe_rows() -> Vec<FeatureRow> {
    let mut rows = Vec::new();
    for hour in [3_u8, 9, 12, 15, 21] {
        for weekday in [1_u8, 6] {
            for category in 0..4_u8 {
                rows.push([
                    f32::from(hour),
                    f32::from(weekday),
                    f32::from(u8::from(weekday >= 5)),
                    f32::from(u8::from(hour == 12)),
                    f32::from(category),
                    f32::from(3 - category),
                ]);
            }
        }
    }
    rows
}

#[given("2000 synthetic samples drawn with seed 42")]
fn synthetic_samples(samples: &RefCell<Vec<LabeledSample>>) {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    *samples.borrow_mut() = Synthesizer::default().generate(2_000, &mut rng);
}

#[when("I train with the default parameters")]
#[expect(
    clippy::expect_used,
    reason = "training on valid synthetic data must succeed"
)]
fn train_default(
    samples: &RefCell<Vec<LabeledSample>>,
    trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>,
) {
    let outcome =
        train_from_samples(&samples.borrow(), &TrainParams::default()).expect("training succeeds");
    *trained.borrow_mut() = Some(outcome);
}

#[when("I save and reload the model")]
fn save_and_reload(
    temp_dir: &TempDir,
    trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>,
    reloaded: &RefCell<Option<Result<BoostedTrees, ArtifactError>>>,
) {
    let path = artifact_path(temp_dir);
    let binding = trained.borrow();
    let Some((model, _)) = binding.as_ref() else {
        panic!("a model must be trained first");
    };
    if let Err(err) = save_model(&path, model) {
        panic!("save model: {err}");
    }
    *reloaded.borrow_mut() = Some(load_model(&path));
}

#[when("I save the model and truncate the file")]
fn save_and_truncate(
    temp_dir: &TempDir,
    trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>,
    reloaded: &RefCell<Option<Result<BoostedTrees, ArtifactError>>>,
) {
    let path = artifact_path(temp_dir);
    let binding = trained.borrow();
    let Some((model, _)) = binding.as_ref() else {
        panic!("a model must be trained first");
    };
    if let Err(err) = save_model(&path, model) {
        panic!("save model: {err}");
    }
    let bytes = match std::fs::read(path.as_std_path()) {
        Ok(bytes) => bytes,
        Err(err) => panic!("read artifact: {err}"),
    };
    let truncated: Vec<u8> = bytes.into_iter().take(10).collect();
    if let Err(err) = std::fs::write(path.as_std_path(), truncated) {
        panic!("truncate artifact: {err}");
    }
    *reloaded.borrow_mut() = Some(load_model(&path));
}

#[then("the held-out r2 is above 0.5")]
fn r2_is_material(trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>) {
    let binding = trained.borrow();
    let Some((_, report)) = binding.as_ref() else {
        panic!("a model must be trained first");
    };
    assert!(
        report.metrics.r2 > 0.5,
        "held-out r2 was {}",
        report.metrics.r2
    );
}

#[then("one fifth of the samples are held out")]
fn held_out_share(trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>) {
    let binding = trained.borrow();
    let Some((_, report)) = binding.as_ref() else {
        panic!("a model must be trained first");
    };
    assert_eq!(report.test_count, 400);
    assert_eq!(report.train_count, 1_600);
    assert_eq!(report.tree_count, 100);
}

#[then("the reloaded model predicts exactly like the trained one")]
fn predictions_survive(
    trained: &RefCell<Option<(BoostedTrees, TrainingReport)>>,
    reloaded: &RefCell<Option<Result<BoostedTrees, ArtifactError>>>,
) {
    let trained_binding = trained.borrow();
    let reloaded_binding = reloaded.borrow();
    let (Some((model, _)), Some(Ok(loaded))) =
        (trained_binding.as_ref(), reloaded_binding.as_ref())
    else {
        panic!("expected a trained and a reloaded model");
    };
    let rows = probe_rows();
    let before = model.predict(&rows);
    let after = loaded.predict(&rows);
    assert!(before.is_ok());
    assert_eq!(before.ok(), after.ok());
}

#[then("loading the artifact fails with a decode error")]
fn decode_fails(reloaded: &RefCell<Option<Result<BoostedTrees, ArtifactError>>>) {
    let binding = reloaded.borrow();
    assert!(
        matches!(binding.as_ref(), Some(Err(ArtifactError::Decode { .. }))),
        "expected a decode error, got {:?}",
        binding.as_ref().map(Result::is_ok)
    );
}

#[scenario(path = "tests/features/training.feature", index = 0)]
fn training_generalises(
    samples: RefCell<Vec<LabeledSample>>,
    trained: RefCell<Option<(BoostedTrees, TrainingReport)>>,
) {
    let _ = (samples, trained);
}

#[scenario(path = "tests/features/training.feature", index = 1)]
fn saved_model_round_trips(
    temp_dir: TempDir,
    samples: RefCell<Vec<LabeledSample>>,
    trained: RefCell<Option<(BoostedTrees, TrainingReport)>>,
    reloaded: RefCell<Option<Result<BoostedTrees, ArtifactError>>>,
) {
    let _ = (temp_dir, samples, trained, reloaded);
}

#[scenario(path = "tests/features/training.feature", index = 2)]
fn truncated_artifact_is_rejected(
    temp_dir: TempDir,
    samples: RefCell<Vec<LabeledSample>>,
    trained: RefCell<Option<(BoostedTrees, TrainingReport)>>,
    reloaded: RefCell<Option<Result<BoostedTrees, ArtifactError>>>,
) {
    let _ = (temp_dir, samples, trained, reloaded);
}
