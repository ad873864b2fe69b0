// ============================================================
// Layer 5 — Composite (Adversarial) Model
// ============================================================
// noise ─► Generator ─► FrozenDiscriminator ─► P(real)
//
// The composite owns no parameters. It borrows the generator
// mutably and a frozen view of the discriminator, and is rebuilt
// for every generator update. Gradients of the composite loss are
// collected for the generator's parameter group only, so a step
// can never move the discriminator.
//
// Its optimizer settings are its own (Adam defaults), separate
// from what either sub-network was compiled with.

use burn::{
    optim::{GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::config::OptimizerSettings;
use crate::domain::update::{UpdateReport, UpdateTarget};
use crate::error::GanError;
use crate::ml::model::GeneratorNet;
use crate::ml::network::{bce_loss, FrozenDiscriminator, Generator};

pub struct Composite<'a, B: AutodiffBackend> {
    generator:     &'a mut Generator<B>,
    discriminator: FrozenDiscriminator<'a, B>,
    optimizer:     OptimizerSettings,
}

impl<'a, B: AutodiffBackend> Composite<'a, B> {
    pub fn new(
        generator:     &'a mut Generator<B>,
        discriminator: FrozenDiscriminator<'a, B>,
        optimizer:     OptimizerSettings,
    ) -> Self {
        Self { generator, discriminator, optimizer }
    }

    /// noise: [b, noise_dim] → P(real): [b, 1]
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        self.discriminator.forward(self.generator.net.forward(noise))
    }

    /// One generator update against `targets` (normally all ones).
    pub fn update<O>(
        &mut self,
        optim:   &mut O,
        noise:   Tensor<B, 2>,
        targets: Tensor<B, 2, Int>,
    ) -> Result<UpdateReport, GanError>
    where
        O: Optimizer<GeneratorNet<B>, B>,
    {
        let trainable = self.discriminator.source_trainable();
        if trainable {
            return Err(GanError::Configuration(
                "composite update attempted while the discriminator is trainable".into(),
            ));
        }

        let rows        = noise.dims()[0];
        let generated   = self.generator.net.forward(noise);
        let logits      = self.discriminator.forward_logits(generated);
        let (loss, val) = bce_loss(logits, targets, UpdateTarget::Composite)?;

        let grads = GradientsParams::from_grads(loss.backward(), &self.generator.net);
        self.generator.net = optim.step(self.optimizer.learning_rate(), self.generator.net.clone(), grads);

        tracing::debug!("composite update: rows={} loss={:.5}", rows, val);

        Ok(UpdateReport {
            target: UpdateTarget::Composite,
            discriminator_trainable: trainable,
            rows,
            loss: val,
        })
    }
}
