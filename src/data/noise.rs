// ============================================================
// Layer 4 — Noise Source
// ============================================================
// Fresh standard-normal noise for every draw; nothing is cached.
// The same noise_dim feeds training steps and snapshots.

use burn::{prelude::*, tensor::Distribution};

#[derive(Clone, Debug)]
pub struct NoiseSource<B: Backend> {
    noise_dim: usize,
    device:    B::Device,
}

impl<B: Backend> NoiseSource<B> {
    pub fn new(noise_dim: usize, device: B::Device) -> Self {
        Self { noise_dim, device }
    }

    /// [rows, noise_dim] ~ Normal(0, 1)
    pub fn draw(&self, rows: usize) -> Tensor<B, 2> {
        Tensor::random([rows, self.noise_dim], Distribution::Normal(0.0, 1.0), &self.device)
    }
}
