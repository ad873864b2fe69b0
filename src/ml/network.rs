// ============================================================
// Layer 5 — Compiled Networks
// ============================================================
// A "compiled" network is an architecture plus the optimizer and
// loss it trains with. The optimizer's moment state lives with the
// training run (see trainer.rs); this layer keeps the settings.
//
// Trainable flag:
//   The discriminator's flag is only ever changed through
//   `Discriminator::scoped`, which returns a TrainableScope. The
//   previous value comes back when the scope drops, also when the
//   update inside it returns an error.
//
//   trainable = true   → `update` steps the discriminator's parameters
//   trainable = false  → `update` only evaluates the loss, and
//                        `frozen()` hands out a gradient-detached copy
//                        for the composite pipeline

use std::ops::{Deref, DerefMut};

use burn::{
    module::AutodiffModule,
    nn::loss::BinaryCrossEntropyLossConfig,
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::{backend::AutodiffBackend, ElementConversion},
};

use crate::config::OptimizerSettings;
use crate::data::batcher::DiscriminatorBatch;
use crate::domain::update::{UpdateReport, UpdateTarget};
use crate::error::GanError;
use crate::ml::model::{DiscriminatorConfig, DiscriminatorNet, GeneratorConfig, GeneratorNet};

/// Binary cross-entropy on logits, failing on a non-finite value.
pub(crate) fn bce_loss<B: Backend>(
    logits:  Tensor<B, 2>,
    targets: Tensor<B, 2, Int>,
    target:  UpdateTarget,
) -> Result<(Tensor<B, 1>, f32), GanError> {
    let bce  = BinaryCrossEntropyLossConfig::new().with_logits(true).init(&logits.device());
    let loss = bce.forward(logits, targets);
    let value: f32 = loss.clone().into_scalar().elem::<f32>();

    if !value.is_finite() {
        return Err(GanError::NumericInstability { target, loss: value });
    }
    Ok((loss, value))
}

// ─── Generator ────────────────────────────────────────────────────────────────
#[derive(Debug)]
pub struct Generator<B: AutodiffBackend> {
    pub(crate) net: GeneratorNet<B>,
    optimizer:      OptimizerSettings,
    noise_dim:      usize,
    feature_dim:    usize,
}

impl<B: AutodiffBackend> Generator<B> {
    pub fn new(
        noise_dim:   usize,
        feature_dim: usize,
        optimizer:   OptimizerSettings,
        device:      &B::Device,
    ) -> Result<Self, GanError> {
        let net = GeneratorConfig::new(noise_dim, feature_dim).init(device)?;
        Ok(Self { net, optimizer, noise_dim, feature_dim })
    }

    /// Inference-mode forward pass: dropout off, no autodiff graph.
    pub fn predict(&self, noise: Tensor<B::InnerBackend, 2>) -> Tensor<B::InnerBackend, 2> {
        self.net.valid().forward(noise)
    }

    pub fn net(&self) -> &GeneratorNet<B> { &self.net }

    pub fn optimizer(&self) -> OptimizerSettings { self.optimizer }

    pub fn noise_dim(&self) -> usize { self.noise_dim }

    pub fn feature_dim(&self) -> usize { self.feature_dim }
}

// ─── Discriminator ────────────────────────────────────────────────────────────
#[derive(Debug)]
pub struct Discriminator<B: AutodiffBackend> {
    net:         DiscriminatorNet<B>,
    optimizer:   OptimizerSettings,
    feature_dim: usize,
    trainable:   bool,
}

impl<B: AutodiffBackend> Discriminator<B> {
    /// Built frozen: the flag is only raised inside a scope.
    pub fn new(
        feature_dim: usize,
        optimizer:   OptimizerSettings,
        device:      &B::Device,
    ) -> Result<Self, GanError> {
        let net = DiscriminatorConfig::new(feature_dim).init(device)?;
        Ok(Self { net, optimizer, feature_dim, trainable: false })
    }

    pub fn is_trainable(&self) -> bool { self.trainable }

    /// Set the trainable flag for the lifetime of the returned scope.
    pub fn scoped(&mut self, trainable: bool) -> TrainableScope<'_, B> {
        let previous   = self.trainable;
        self.trainable = trainable;
        TrainableScope { discriminator: self, previous }
    }

    /// Gradient-detached view for the composite pipeline.
    /// Refused while the discriminator is trainable.
    pub fn frozen(&self) -> Result<FrozenDiscriminator<'_, B>, GanError> {
        if self.trainable {
            return Err(GanError::Configuration(
                "discriminator must be frozen before it joins the composite model".into(),
            ));
        }
        Ok(FrozenDiscriminator { source: self, net: self.net.clone().no_grad() })
    }

    /// One discriminator-only update on a combined real + synthetic batch.
    pub fn update<O>(&mut self, optim: &mut O, batch: DiscriminatorBatch<B>) -> Result<UpdateReport, GanError>
    where
        O: Optimizer<DiscriminatorNet<B>, B>,
    {
        let trainable   = self.trainable;
        let rows        = batch.rows();
        let logits      = self.net.forward_logits(batch.features);
        let (loss, val) = bce_loss(logits, batch.labels, UpdateTarget::Discriminator)?;

        if trainable {
            let grads = GradientsParams::from_grads(loss.backward(), &self.net);
            self.net  = optim.step(self.optimizer.learning_rate(), self.net.clone(), grads);
        }

        tracing::debug!("discriminator update: rows={} loss={:.5} trainable={}", rows, val, trainable);

        Ok(UpdateReport {
            target: UpdateTarget::Discriminator,
            discriminator_trainable: trainable,
            rows,
            loss: val,
        })
    }

    pub fn net(&self) -> &DiscriminatorNet<B> { &self.net }

    pub fn optimizer(&self) -> OptimizerSettings { self.optimizer }

    pub fn feature_dim(&self) -> usize { self.feature_dim }
}

// ─── TrainableScope ───────────────────────────────────────────────────────────
/// Holds the discriminator with its flag set; restores the previous
/// value on drop.
pub struct TrainableScope<'a, B: AutodiffBackend> {
    discriminator: &'a mut Discriminator<B>,
    previous:      bool,
}

impl<B: AutodiffBackend> Deref for TrainableScope<'_, B> {
    type Target = Discriminator<B>;

    fn deref(&self) -> &Self::Target { self.discriminator }
}

impl<B: AutodiffBackend> DerefMut for TrainableScope<'_, B> {
    fn deref_mut(&mut self) -> &mut Self::Target { self.discriminator }
}

impl<B: AutodiffBackend> Drop for TrainableScope<'_, B> {
    fn drop(&mut self) {
        self.discriminator.trainable = self.previous;
    }
}

// ─── FrozenDiscriminator ──────────────────────────────────────────────────────
/// Discriminator parameters excluded from gradient computation.
/// Borrows the source so its flag cannot change while the view lives.
pub struct FrozenDiscriminator<'a, B: AutodiffBackend> {
    source: &'a Discriminator<B>,
    net:    DiscriminatorNet<B>,
}

impl<B: AutodiffBackend> FrozenDiscriminator<'_, B> {
    pub fn forward_logits(&self, rows: Tensor<B, 2>) -> Tensor<B, 2> {
        self.net.forward_logits(rows)
    }

    pub fn forward(&self, rows: Tensor<B, 2>) -> Tensor<B, 2> {
        self.net.forward(rows)
    }

    pub fn source_trainable(&self) -> bool { self.source.is_trainable() }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::DiscriminatorBatcher;
    use burn::backend::{Autodiff, NdArray};
    use burn::tensor::Distribution;

    type TestBackend = Autodiff<NdArray>;

    fn discriminator(d: usize) -> Discriminator<TestBackend> {
        Discriminator::new(d, OptimizerSettings::network_default(), &Default::default()).unwrap()
    }

    fn weights(net: &DiscriminatorNet<TestBackend>) -> Vec<f32> {
        net.output.weight.val().into_data().to_vec::<f32>().unwrap()
    }

    fn batch_of(d: usize, b: usize, value: f32) -> DiscriminatorBatch<TestBackend> {
        let device  = Default::default();
        let batcher = DiscriminatorBatcher::<TestBackend>::new(device);
        let real    = vec![value; b * d];
        let fake    = Tensor::<TestBackend, 2>::random([b, d], Distribution::Normal(0.0, 1.0), &Default::default());
        batcher.assemble(&real, fake)
    }

    fn batch(d: usize, b: usize) -> DiscriminatorBatch<TestBackend> {
        batch_of(d, b, 1.0)
    }

    #[test]
    fn test_discriminator_starts_frozen() {
        assert!(!discriminator(3).is_trainable());
    }

    #[test]
    fn test_scope_restores_previous_flag() {
        let mut disc = discriminator(3);
        {
            let scope = disc.scoped(true);
            assert!(scope.is_trainable());
        }
        assert!(!disc.is_trainable());

        {
            let mut outer = disc.scoped(true);
            {
                let inner = outer.scoped(false);
                assert!(!inner.is_trainable());
            }
            assert!(outer.is_trainable());
        }
        assert!(!disc.is_trainable());
    }

    #[test]
    fn test_scope_restores_flag_when_frozen_view_refused() {
        let mut disc = discriminator(2);
        let result: Result<(), GanError> = (|| {
            let scope = disc.scoped(true);
            scope.frozen()?;
            Ok(())
        })();
        assert!(matches!(result, Err(GanError::Configuration(_))));
        assert!(!disc.is_trainable());
    }

    #[test]
    fn test_non_finite_loss_fails_update_and_restores_flag() {
        let mut disc  = discriminator(2);
        let mut optim = disc.optimizer().adam().init::<TestBackend, DiscriminatorNet<TestBackend>>();
        let before    = weights(disc.net());

        let result = disc.scoped(true).update(&mut optim, batch_of(2, 3, f32::NAN));

        match result {
            Err(GanError::NumericInstability { target, loss }) => {
                assert_eq!(target, UpdateTarget::Discriminator);
                assert!(!loss.is_finite());
            }
            other => panic!("expected numeric instability, got {other:?}"),
        }
        assert!(!disc.is_trainable());
        assert_eq!(weights(disc.net()), before);
    }

    #[test]
    fn test_frozen_refused_while_trainable() {
        let mut disc = discriminator(2);
        let scope = disc.scoped(true);
        assert!(scope.frozen().is_err());
    }

    #[test]
    fn test_trainable_update_changes_parameters() {
        let mut disc  = discriminator(3);
        let mut optim = disc.optimizer().adam().init::<TestBackend, DiscriminatorNet<TestBackend>>();
        let before    = weights(disc.net());

        let report = disc.scoped(true).update(&mut optim, batch(3, 4)).unwrap();

        assert!(report.discriminator_trainable);
        assert_eq!(report.rows, 8);
        assert_ne!(weights(disc.net()), before);
    }

    #[test]
    fn test_frozen_update_leaves_parameters() {
        let mut disc  = discriminator(3);
        let mut optim = disc.optimizer().adam().init::<TestBackend, DiscriminatorNet<TestBackend>>();
        let before    = weights(disc.net());

        let report = disc.update(&mut optim, batch(3, 4)).unwrap();

        assert!(!report.discriminator_trainable);
        assert!(report.loss.is_finite());
        assert_eq!(weights(disc.net()), before);
    }

    #[test]
    fn test_generator_predict_shape() {
        let device = Default::default();
        let gen: Generator<TestBackend> =
            Generator::new(1, 5, OptimizerSettings::network_default(), &device).unwrap();
        let noise = Tensor::<NdArray, 2>::random([42, 1], Distribution::Normal(0.0, 1.0), &device);
        assert_eq!(gen.predict(noise).dims(), [42, 5]);
    }
}
