// ============================================================
// Layer 5 — Generator and Discriminator Architectures
// ============================================================
// Both networks are plain feed-forward stacks:
//
//   DenseBlock = Linear → LeakyReLU(0.2) → Dropout(0.2)
//
//   Generator:      noise_dim → 16 → 32 → 64 → D        (linear output)
//   Discriminator:  D → D → 32 → 16 → 1                  (sigmoid output)
//
// The discriminator's first hidden width equals its input width D.
//
// The discriminator returns logits from `forward_logits` so the
// loss can use the numerically stable logit form of binary
// cross-entropy; `forward` applies the sigmoid and returns the
// probability that a row is real.

use burn::{
    nn::{Dropout, DropoutConfig, LeakyRelu, LeakyReluConfig, Linear, LinearConfig},
    prelude::*,
    tensor::activation::sigmoid,
};

use crate::error::GanError;

/// Hidden widths of the generator, in order.
pub const GENERATOR_HIDDEN: [usize; 3] = [16, 32, 64];

/// Discriminator hidden widths after the first (which equals D).
pub const DISCRIMINATOR_HIDDEN_TAIL: [usize; 2] = [32, 16];

pub const LEAKY_SLOPE:  f64 = 0.2;
pub const DROPOUT_RATE: f64 = 0.2;

// ─── Dense Block ──────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct DenseBlock<B: Backend> {
    pub linear:     Linear<B>,
    pub activation: LeakyRelu,
    pub dropout:    Dropout,
}

impl<B: Backend> DenseBlock<B> {
    fn new(d_input: usize, d_output: usize, device: &B::Device) -> Self {
        Self {
            linear:     LinearConfig::new(d_input, d_output).init(device),
            activation: LeakyReluConfig::new().with_negative_slope(LEAKY_SLOPE).init(),
            dropout:    DropoutConfig::new(DROPOUT_RATE).init(),
        }
    }

    pub fn forward(&self, x: Tensor<B, 2>) -> Tensor<B, 2> {
        self.dropout.forward(self.activation.forward(self.linear.forward(x)))
    }
}

fn build_blocks<B: Backend>(d_input: usize, widths: &[usize], device: &B::Device) -> Vec<DenseBlock<B>> {
    let mut d_in = d_input;
    widths
        .iter()
        .map(|&d_out| {
            let block = DenseBlock::new(d_in, d_out, device);
            d_in = d_out;
            block
        })
        .collect()
}

// ─── Generator ────────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct GeneratorConfig {
    /// Width of each noise vector
    pub noise_dim:   usize,
    /// Width of each generated row (D)
    pub feature_dim: usize,
}

impl GeneratorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<GeneratorNet<B>, GanError> {
        if self.noise_dim == 0 {
            return Err(GanError::Configuration("generator noise dimension must be positive".into()));
        }
        if self.feature_dim == 0 {
            return Err(GanError::Configuration("generator output width (D) must be positive".into()));
        }

        let hidden = build_blocks(self.noise_dim, &GENERATOR_HIDDEN, device);
        let last   = GENERATOR_HIDDEN[GENERATOR_HIDDEN.len() - 1];
        let output = LinearConfig::new(last, self.feature_dim).init(device);

        Ok(GeneratorNet { hidden, output })
    }
}

#[derive(Module, Debug)]
pub struct GeneratorNet<B: Backend> {
    pub hidden: Vec<DenseBlock<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> GeneratorNet<B> {
    /// noise: [batch, noise_dim] → rows: [batch, D]
    pub fn forward(&self, noise: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.iter().fold(noise, |x, block| block.forward(x));
        self.output.forward(x)
    }
}

// ─── Discriminator ────────────────────────────────────────────────────────────
#[derive(Config, Debug)]
pub struct DiscriminatorConfig {
    /// Width of each input row (D)
    pub feature_dim: usize,
}

impl DiscriminatorConfig {
    pub fn hidden_widths(&self) -> Vec<usize> {
        let mut widths = vec![self.feature_dim];
        widths.extend(DISCRIMINATOR_HIDDEN_TAIL);
        widths
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<DiscriminatorNet<B>, GanError> {
        if self.feature_dim == 0 {
            return Err(GanError::Configuration("discriminator input width (D) must be positive".into()));
        }

        let widths = self.hidden_widths();
        let hidden = build_blocks(self.feature_dim, &widths, device);
        let output = LinearConfig::new(widths[widths.len() - 1], 1).init(device);

        Ok(DiscriminatorNet { hidden, output })
    }
}

#[derive(Module, Debug)]
pub struct DiscriminatorNet<B: Backend> {
    pub hidden: Vec<DenseBlock<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> DiscriminatorNet<B> {
    /// rows: [batch, D] → logits: [batch, 1]
    pub fn forward_logits(&self, rows: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = self.hidden.iter().fold(rows, |x, block| block.forward(x));
        self.output.forward(x)
    }

    /// rows: [batch, D] → P(real): [batch, 1]
    pub fn forward(&self, rows: Tensor<B, 2>) -> Tensor<B, 2> {
        sigmoid(self.forward_logits(rows))
    }
}
