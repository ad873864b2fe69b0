// ============================================================
// Layer 4 — Discriminator Batcher
// ============================================================
// Stacks real and synthetic rows into the tensors one
// discriminator update runs on, and builds the label tensors for
// both update kinds.
//
//   features: [2b, D]   rows 0..b real, rows b..2b synthetic
//   labels:   [2b, 1]   1 for the real half, 0 for the synthetic half
//
// Generator updates use all-ones targets of shape [b, 1]: the
// generator is rewarded when the discriminator calls its rows real.

use burn::prelude::*;

/// Label of a real training row.
pub const REAL_LABEL: i32 = 1;
/// Label of a generated row.
pub const SYNTHETIC_LABEL: i32 = 0;

/// Labels for a combined batch: `b` real labels followed by `b` synthetic.
pub fn discriminator_labels(batch_size: usize) -> Vec<i32> {
    let mut labels = vec![SYNTHETIC_LABEL; 2 * batch_size];
    labels[..batch_size].fill(REAL_LABEL);
    labels
}

/// Targets for a composite update: every generated row labelled real.
pub fn generator_targets(batch_size: usize) -> Vec<i32> {
    vec![REAL_LABEL; batch_size]
}

// ─── DiscriminatorBatch ───────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct DiscriminatorBatch<B: Backend> {
    /// [2b, D]
    pub features: Tensor<B, 2>,
    /// [2b, 1]
    pub labels:   Tensor<B, 2, Int>,
}

impl<B: Backend> DiscriminatorBatch<B> {
    pub fn rows(&self) -> usize {
        self.features.dims()[0]
    }
}

// ─── DiscriminatorBatcher ─────────────────────────────────────────────────────
#[derive(Clone, Debug)]
pub struct DiscriminatorBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> DiscriminatorBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// `real` is row-major with the same row count and width as `synthetic`.
    pub fn assemble(&self, real: &[f32], synthetic: Tensor<B, 2>) -> DiscriminatorBatch<B> {
        let [batch_size, feature_dim] = synthetic.dims();
        debug_assert_eq!(real.len(), batch_size * feature_dim);

        let real = Tensor::<B, 1>::from_floats(real, &self.device)
            .reshape([batch_size, feature_dim]);

        // real rows first, matching the label order
        let features = Tensor::cat(vec![real, synthetic], 0);
        let labels   = self.labels(&discriminator_labels(batch_size));

        DiscriminatorBatch { features, labels }
    }

    /// All-ones targets for a composite update, shape [b, 1].
    pub fn generator_targets(&self, batch_size: usize) -> Tensor<B, 2, Int> {
        self.labels(&generator_targets(batch_size))
    }

    fn labels(&self, values: &[i32]) -> Tensor<B, 2, Int> {
        Tensor::<B, 1, Int>::from_ints(values, &self.device).reshape([values.len(), 1])
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    #[test]
    fn test_labels_real_half_first() {
        for b in [1, 4, 16] {
            let labels = discriminator_labels(b);
            assert_eq!(labels.len(), 2 * b);
            assert!(labels[..b].iter().all(|&l| l == 1));
            assert!(labels[b..].iter().all(|&l| l == 0));
        }
    }

    #[test]
    fn test_generator_targets_all_ones() {
        assert_eq!(generator_targets(3), vec![1, 1, 1]);
    }

    #[test]
    fn test_assemble_stacks_real_before_synthetic() {
        let device  = Default::default();
        let batcher = DiscriminatorBatcher::<TestBackend>::new(device);

        let real: Vec<f32> = vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let fake: [f32; 6] = [-1.0, -1.0, -2.0, -2.0, -3.0, -3.0];
        let synthetic = Tensor::<TestBackend, 1>::from_floats(fake.as_slice(), &Default::default())
            .reshape([3, 2]);

        let batch = batcher.assemble(&real, synthetic);
        assert_eq!(batch.rows(), 6);
        assert_eq!(batch.features.dims(), [6, 2]);
        assert_eq!(batch.labels.dims(), [6, 1]);

        let features = batch.features.into_data().to_vec::<f32>().unwrap();
        assert_eq!(features, vec![1.0, 1.0, 2.0, 2.0, 3.0, 3.0, -1.0, -1.0, -2.0, -2.0, -3.0, -3.0]);

        let labels: Vec<i64> = batch.labels.into_data().convert::<i64>().to_vec::<i64>().unwrap();
        assert_eq!(labels, vec![1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_generator_target_tensor_shape() {
        let batcher = DiscriminatorBatcher::<TestBackend>::new(Default::default());
        assert_eq!(batcher.generator_targets(5).dims(), [5, 1]);
    }
}
