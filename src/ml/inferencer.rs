// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs the generator in inference mode (dropout off, no autodiff
// graph, no parameter change) and turns the result into a
// SampleBatch for the Output Archive.

use burn::{prelude::*, tensor::backend::AutodiffBackend};

use crate::data::noise::NoiseSource;
use crate::domain::archive::SampleBatch;
use crate::error::GanError;
use crate::ml::network::Generator;

pub struct Inferencer<B: AutodiffBackend> {
    noise: NoiseSource<B::InnerBackend>,
}

impl<B: AutodiffBackend> Inferencer<B> {
    pub fn new(noise_dim: usize, device: B::Device) -> Self {
        Self { noise: NoiseSource::new(noise_dim, device) }
    }

    /// Draw `count` independent noise vectors and generate one row for each.
    pub fn sample(&self, generator: &Generator<B>, count: usize) -> Result<SampleBatch, GanError> {
        let generated = generator.predict(self.noise.draw(count));
        to_sample_batch(generated)
    }

    /// Noise on the inner backend, shared with the training step.
    pub fn noise(&self) -> &NoiseSource<B::InnerBackend> { &self.noise }
}

/// Copy a [rows, cols] tensor back into a row-major SampleBatch.
pub fn to_sample_batch<B: Backend>(tensor: Tensor<B, 2>) -> Result<SampleBatch, GanError> {
    let [rows, cols] = tensor.dims();
    let values = tensor
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|e| GanError::TensorData(format!("{e:?}")))?;
    Ok(SampleBatch::new(rows, cols, values))
}
