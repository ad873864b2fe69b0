// ============================================================
// Layer 5 — Adversarial Training Loop
// ============================================================
// `Gan` ties the pieces together and exposes the four public
// operations: build, train, describe_models, output_archive.
//
// One batch step:
//   1. noise [b, noise_dim]        → generator (inference mode) → b synthetic rows
//   2. b real rows, with replacement, from the training matrix
//   3. [real; synthetic] with labels [1…1; 0…0]
//   4. discriminator trainable = true  → discriminator update
//   5. fresh noise [b, noise_dim], targets all ones
//   6. discriminator trainable = false → composite update (generator only)
//
// An epoch is `batch_size` such steps. After epoch k, when
// k % trace_interval == 0, a log line is appended and a snapshot
// of plot_rows × plot_cols generated rows is archived as "epoch k".
//
// Optimizer moment state (Adam m and v) is created per `train`
// call and lives for that call only.

use std::sync::Arc;

use burn::{
    optim::Optimizer,
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use chrono::Local;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::GanConfig;
use crate::data::{batcher::DiscriminatorBatcher, sampler};
use crate::domain::archive::OutputArchive;
use crate::domain::matrix::TrainingMatrix;
use crate::domain::traits::{NoopObserver, UpdateObserver};
use crate::error::GanError;
use crate::infra::session_log::SessionLog;
use crate::ml::adversarial::Composite;
use crate::ml::inferencer::Inferencer;
use crate::ml::model::{DiscriminatorNet, GeneratorNet};
use crate::ml::network::{Discriminator, Generator};
use crate::ml::summary::{discriminator_summary, generator_summary, ModelsSummary};

/// CPU backend with autodiff.
pub type DefaultBackend = burn::backend::Autodiff<burn::backend::NdArray>;

pub struct Gan<B: AutodiffBackend> {
    config:        GanConfig,
    matrix:        Arc<TrainingMatrix>,
    generator:     Generator<B>,
    discriminator: Discriminator<B>,
    batcher:       DiscriminatorBatcher<B>,
    inferencer:    Inferencer<B>,
    archive:       OutputArchive,
    session_log:   SessionLog,
    rng:           StdRng,
}

impl<B: AutodiffBackend> Gan<B> {
    /// Validate inputs, open the session log, then build both networks.
    ///
    /// A matrix without rows or feature columns fails with a
    /// configuration error before any network is built.
    pub fn build(matrix: Arc<TrainingMatrix>, config: GanConfig, device: B::Device) -> Result<Self, GanError> {
        config.validate()?;

        let (rows, features) = matrix.shape();
        if features == 0 {
            return Err(GanError::Configuration("training matrix has no feature columns".into()));
        }
        if rows == 0 {
            return Err(GanError::Configuration("training matrix has no rows".into()));
        }

        let rng = match config.seed {
            Some(seed) => {
                B::seed(seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };

        let session_log = SessionLog::create(&config.log_dir, Local::now())?;

        let generator     = Generator::new(config.noise_dim, features, config.generator_optimizer, &device)?;
        let discriminator = Discriminator::new(features, config.discriminator_optimizer, &device)?;

        tracing::info!(
            "GAN ready: {} rows × {} features, noise_dim={}, generator {} params, discriminator {} params",
            rows,
            features,
            config.noise_dim,
            generator.net().num_params(),
            discriminator.net().num_params(),
        );

        Ok(Self {
            batcher:    DiscriminatorBatcher::new(device.clone()),
            inferencer: Inferencer::new(config.noise_dim, device),
            archive:    OutputArchive::new(),
            config,
            matrix,
            generator,
            discriminator,
            session_log,
            rng,
        })
    }

    /// Run `epochs` epochs of `batch_size` alternating update steps.
    pub fn train(&mut self, epochs: usize, batch_size: usize) -> Result<(), GanError> {
        self.train_observed(epochs, batch_size, &mut NoopObserver)
    }

    /// `train`, reporting every update to `observer` in the order it ran.
    pub fn train_observed(
        &mut self,
        epochs:     usize,
        batch_size: usize,
        observer:   &mut dyn UpdateObserver,
    ) -> Result<(), GanError> {
        self.check_run(epochs, batch_size)?;

        let mut disc_optim = self
            .discriminator
            .optimizer()
            .adam()
            .init::<B, DiscriminatorNet<B>>();
        let mut comp_optim = self
            .config
            .composite_optimizer
            .adam()
            .init::<B, GeneratorNet<B>>();

        tracing::info!("Training for {} epochs, batch size {}", epochs, batch_size);

        for epoch in 1..=epochs {
            for _ in 0..batch_size {
                self.step(batch_size, &mut disc_optim, &mut comp_optim, observer)?;
            }

            if epoch % self.config.trace_interval == 0 {
                self.session_log.record(epoch, epochs)?;
                self.snapshot(epoch)?;
                tracing::info!("epoch {} of {}", epoch, epochs);
            }
        }

        tracing::info!("Training complete: {} snapshots archived", self.archive.len());
        Ok(())
    }

    fn check_run(&self, epochs: usize, batch_size: usize) -> Result<(), GanError> {
        if epochs == 0 {
            return Err(GanError::Configuration("epochs must be positive".into()));
        }
        if batch_size == 0 {
            return Err(GanError::Configuration("batch size must be positive".into()));
        }
        if batch_size > self.matrix.rows() {
            return Err(GanError::Configuration(format!(
                "batch size {} exceeds the {} rows of the training matrix",
                batch_size,
                self.matrix.rows()
            )));
        }
        Ok(())
    }

    fn step<OD, OG>(
        &mut self,
        batch_size: usize,
        disc_optim: &mut OD,
        comp_optim: &mut OG,
        observer:   &mut dyn UpdateObserver,
    ) -> Result<(), GanError>
    where
        OD: Optimizer<DiscriminatorNet<B>, B>,
        OG: Optimizer<GeneratorNet<B>, B>,
    {
        // ── Discriminator on real + synthetic ─────────────────────────────────
        let noise     = self.inferencer.noise().draw(batch_size);
        let synthetic = Tensor::<B, 2>::from_inner(self.generator.predict(noise));
        let real      = sampler::sample_rows(&mut self.rng, &self.matrix, batch_size);
        let batch     = self.batcher.assemble(&real, synthetic);

        let report = {
            let mut disc = self.discriminator.scoped(true);
            disc.update(disc_optim, batch)?
        };
        observer.on_update(&report);

        // ── Generator through the frozen discriminator ────────────────────────
        let noise   = Tensor::<B, 2>::from_inner(self.inferencer.noise().draw(batch_size));
        let targets = self.batcher.generator_targets(batch_size);

        let report = {
            let disc = self.discriminator.scoped(false);
            let mut composite = Composite::new(&mut self.generator, disc.frozen()?, self.config.composite_optimizer);
            composite.update(comp_optim, noise, targets)?
        };
        observer.on_update(&report);

        Ok(())
    }

    /// Generate plot_rows × plot_cols rows and archive them as "epoch {epoch}".
    /// Calling twice with the same epoch replaces the earlier snapshot.
    pub fn snapshot(&mut self, epoch: usize) -> Result<(), GanError> {
        let batch = self.inferencer.sample(&self.generator, self.config.samples_per_snapshot())?;
        self.archive.insert(OutputArchive::key_for(epoch), batch);
        Ok(())
    }

    pub fn describe_models(&self) -> ModelsSummary {
        ModelsSummary {
            generator:     generator_summary(&self.generator),
            discriminator: discriminator_summary(&self.discriminator),
        }
    }

    pub fn output_archive(&self) -> &OutputArchive { &self.archive }

    pub fn session_log(&self) -> &SessionLog { &self.session_log }

    pub fn config(&self) -> &GanConfig { &self.config }

    pub fn matrix(&self) -> &Arc<TrainingMatrix> { &self.matrix }

    pub fn generator(&self) -> &Generator<B> { &self.generator }

    pub fn discriminator(&self) -> &Discriminator<B> { &self.discriminator }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::traits::RecordingObserver;
    use crate::domain::update::UpdateTarget;

    fn matrix(rows: usize, cols: usize) -> Arc<TrainingMatrix> {
        let values = (0..rows * cols).map(|i| ((i as f32) * 0.37).sin()).collect();
        Arc::new(TrainingMatrix::new(rows, cols, values).unwrap())
    }

    fn config(dir: &std::path::Path) -> GanConfig {
        GanConfig { log_dir: dir.join("log"), seed: Some(11), ..GanConfig::default() }
    }

    fn gan(rows: usize, cols: usize, dir: &std::path::Path) -> Gan<DefaultBackend> {
        Gan::build(matrix(rows, cols), config(dir), Default::default()).unwrap()
    }

    #[test]
    fn test_flag_true_for_discriminator_false_for_composite() {
        let dir      = tempfile::tempdir().unwrap();
        let mut gan  = gan(10, 3, dir.path());
        let mut seen = RecordingObserver::default();

        gan.train_observed(1, 4, &mut seen).unwrap();

        // 4 steps × (discriminator, composite)
        assert_eq!(seen.reports.len(), 8);
        for pair in seen.reports.chunks(2) {
            assert_eq!(pair[0].target, UpdateTarget::Discriminator);
            assert!(pair[0].discriminator_trainable);
            assert_eq!(pair[0].rows, 8);

            assert_eq!(pair[1].target, UpdateTarget::Composite);
            assert!(!pair[1].discriminator_trainable);
            assert_eq!(pair[1].rows, 4);
        }
        // back at rest after training
        assert!(!gan.discriminator().is_trainable());
    }

    #[test]
    fn test_snapshot_same_epoch_overwrites() {
        let dir     = tempfile::tempdir().unwrap();
        let mut gan = gan(6, 2, dir.path());

        gan.snapshot(100).unwrap();
        gan.snapshot(100).unwrap();

        assert_eq!(gan.output_archive().len(), 1);
        assert_eq!(gan.output_archive().get("epoch 100").unwrap().shape(), (42, 2));
    }

    #[test]
    fn test_zero_columns_rejected_before_networks() {
        let dir = tempfile::tempdir().unwrap();
        let m   = Arc::new(TrainingMatrix::new(5, 0, Vec::new()).unwrap());

        let err = Gan::<DefaultBackend>::build(m, config(dir.path()), Default::default()).err().unwrap();
        assert!(matches!(err, GanError::Configuration(_)));
        // no session was started either
        assert!(!dir.path().join("log").exists());
    }

    #[test]
    fn test_zero_rows_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let m   = Arc::new(TrainingMatrix::new(0, 3, Vec::new()).unwrap());
        assert!(Gan::<DefaultBackend>::build(m, config(dir.path()), Default::default()).is_err());
    }

    #[test]
    fn test_invalid_run_arguments() {
        let dir     = tempfile::tempdir().unwrap();
        let mut gan = gan(4, 2, dir.path());

        assert!(matches!(gan.train(0, 2), Err(GanError::Configuration(_))));
        assert!(matches!(gan.train(1, 0), Err(GanError::Configuration(_))));
        assert!(matches!(gan.train(1, 5), Err(GanError::Configuration(_))));
    }

    #[test]
    fn test_matrix_is_shared_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        let m   = matrix(8, 2);
        let gan = Gan::<DefaultBackend>::build(Arc::clone(&m), config(dir.path()), Default::default()).unwrap();
        assert!(Arc::ptr_eq(gan.matrix(), &m));
    }

    #[test]
    fn test_describe_models_reports_both_networks() {
        let dir     = tempfile::tempdir().unwrap();
        let gan     = gan(6, 4, dir.path());
        let summary = gan.describe_models();

        assert_eq!(summary.generator.output_width(), 4);
        assert_eq!(summary.discriminator.first_dense_input(), 4);
        assert!(gan.output_archive().is_empty());
    }
}
