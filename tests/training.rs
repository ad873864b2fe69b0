// End-to-end training runs on the CPU backend.

use std::path::Path;
use std::sync::Arc;

use tabular_gan::domain::traits::RecordingObserver;
use tabular_gan::{DefaultBackend, Gan, GanConfig, GanError, TrainingMatrix, UpdateTarget};

fn matrix(rows: usize, cols: usize) -> Arc<TrainingMatrix> {
    let values = (0..rows * cols)
        .map(|i| ((i as f32) * 0.61).sin() * 0.5)
        .collect();
    Arc::new(TrainingMatrix::new(rows, cols, values).unwrap())
}

fn config(dir: &Path, trace_interval: usize) -> GanConfig {
    GanConfig {
        trace_interval,
        log_dir: dir.join("log"),
        seed: Some(2024),
        ..GanConfig::default()
    }
}

fn log_files(dir: &Path) -> Vec<std::path::PathBuf> {
    std::fs::read_dir(dir.join("log"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect()
}

#[test]
fn test_short_run_below_trace_interval_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(10, 3), config(dir.path(), 2), Default::default()).unwrap();

    let mut seen = RecordingObserver::default();
    gan.train_observed(1, 4, &mut seen).unwrap();

    assert_eq!(seen.reports.len(), 8);
    assert!(gan.output_archive().is_empty());
    assert!(gan.session_log().lines().unwrap().is_empty());

    // the log file exists from construction on, even with nothing in it
    let files = log_files(dir.path());
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("log ") && name.ends_with(".txt"), "unexpected name {name}");
}

#[test]
fn test_single_trace_at_final_epoch() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(6, 2), config(dir.path(), 100), Default::default()).unwrap();

    gan.train(100, 1).unwrap();

    let lines = gan.session_log().lines().unwrap();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("epoch 100 of 100"), "unexpected line {}", lines[0]);

    let keys: Vec<&str> = gan.output_archive().keys().collect();
    assert_eq!(keys, vec!["epoch 100"]);
}

#[test]
fn test_full_run_archives_each_trace() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(42, 5), config(dir.path(), 100), Default::default()).unwrap();

    gan.train(200, 16).unwrap();

    let lines = gan.session_log().lines().unwrap();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("epoch 100 of 200"));
    assert!(lines[1].ends_with("epoch 200 of 200"));

    let archive = gan.output_archive();
    let keys: Vec<&str> = archive.keys().collect();
    assert_eq!(keys, vec!["epoch 100", "epoch 200"]);
    for (_, batch) in archive.iter() {
        assert_eq!(batch.shape(), (42, 5));
        assert!(batch.values().iter().all(|v| v.is_finite()));
    }
}

#[test]
fn test_update_order_alternates() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(8, 4), config(dir.path(), 100), Default::default()).unwrap();

    let mut seen = RecordingObserver::default();
    gan.train_observed(2, 3, &mut seen).unwrap();

    // 2 epochs × 3 steps × 2 updates
    assert_eq!(seen.reports.len(), 12);
    let targets: Vec<UpdateTarget> = seen.reports.iter().map(|r| r.target).collect();
    for (i, target) in targets.iter().enumerate() {
        let expected = if i % 2 == 0 { UpdateTarget::Discriminator } else { UpdateTarget::Composite };
        assert_eq!(*target, expected);
    }
    assert!(seen.reports.iter().all(|r| r.discriminator_trainable == (r.target == UpdateTarget::Discriminator)));
}

#[test]
fn test_second_train_call_continues_archive() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(6, 2), config(dir.path(), 1), Default::default()).unwrap();

    gan.train(2, 2).unwrap();
    gan.train(3, 2).unwrap();

    // epoch numbering restarts per call; repeated keys overwrite in place
    let keys: Vec<&str> = gan.output_archive().keys().collect();
    assert_eq!(keys, vec!["epoch 1", "epoch 2", "epoch 3"]);
    assert_eq!(gan.session_log().lines().unwrap().len(), 5);
}

#[test]
fn test_zero_feature_columns_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let m = Arc::new(TrainingMatrix::new(3, 0, Vec::new()).unwrap());

    let result = Gan::<DefaultBackend>::build(m, config(dir.path(), 100), Default::default());
    assert!(matches!(result, Err(GanError::Configuration(_))));
}

#[test]
fn test_batch_larger_than_matrix_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut gan = Gan::<DefaultBackend>::build(matrix(3, 2), config(dir.path(), 100), Default::default()).unwrap();

    assert!(matches!(gan.train(1, 4), Err(GanError::Configuration(_))));
    assert!(matches!(gan.train(0, 1), Err(GanError::Configuration(_))));
    // nothing ran
    assert!(gan.session_log().lines().unwrap().is_empty());
}

#[test]
fn test_non_finite_loss_aborts_run() {
    let dir = tempfile::tempdir().unwrap();
    let nan = Arc::new(TrainingMatrix::new(4, 2, vec![f32::NAN; 8]).unwrap());
    let mut gan = Gan::<DefaultBackend>::build(nan, config(dir.path(), 1), Default::default()).unwrap();

    let result = gan.train(1, 2);

    assert!(
        matches!(result, Err(GanError::NumericInstability { target: UpdateTarget::Discriminator, .. })),
        "unexpected result {result:?}"
    );
    // flag restored and the epoch never reached its trace hook
    assert!(!gan.discriminator().is_trainable());
    assert!(gan.output_archive().is_empty());
    assert!(gan.session_log().lines().unwrap().is_empty());
}
