// ============================================================
// Layer 5 — Model Summaries
// ============================================================
// Human-readable structure of both networks: one line per layer
// with its output width and parameter count, then totals and the
// optimizer / loss each network is compiled with. Layer widths
// are read from the built modules, never from configuration.

use std::fmt;

use burn::{nn::Linear, prelude::*, tensor::backend::AutodiffBackend};

use crate::config::OptimizerSettings;
use crate::ml::model::{DenseBlock, DiscriminatorNet, GeneratorNet};
use crate::ml::network::{Discriminator, Generator};

pub const LOSS_NAME: &str = "binary_crossentropy";

#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub name:         String,
    pub kind:         String,
    pub output_width: usize,
    pub params:       usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkSummary {
    pub name:         String,
    pub input_width:  usize,
    pub layers:       Vec<LayerSummary>,
    pub total_params: usize,
    pub optimizer:    OptimizerSettings,
    pub loss:         &'static str,
}

impl NetworkSummary {
    pub fn output_width(&self) -> usize {
        self.layers.last().map(|l| l.output_width).unwrap_or(self.input_width)
    }

    /// Width of the first dense layer's input.
    pub fn first_dense_input(&self) -> usize { self.input_width }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelsSummary {
    pub generator:     NetworkSummary,
    pub discriminator: NetworkSummary,
}

// ─── Builders ─────────────────────────────────────────────────────────────────
struct LayerCounter {
    dense: usize,
    leaky: usize,
    drop:  usize,
}

impl LayerCounter {
    fn new() -> Self { Self { dense: 0, leaky: 0, drop: 0 } }

    fn name(counter: &mut usize, base: &str) -> String {
        let name = if *counter == 0 { base.to_string() } else { format!("{base}_{counter}") };
        *counter += 1;
        name
    }
}

fn linear_dims<B: Backend>(linear: &Linear<B>) -> (usize, usize, usize) {
    let [d_in, d_out] = linear.weight.val().dims();
    let bias = linear.bias.as_ref().map(|b| b.val().dims()[0]).unwrap_or(0);
    (d_in, d_out, d_in * d_out + bias)
}

fn dense_layer<B: Backend>(c: &mut LayerCounter, linear: &Linear<B>, kind: &str) -> LayerSummary {
    let (_, d_out, params) = linear_dims(linear);
    LayerSummary {
        name:         LayerCounter::name(&mut c.dense, "dense"),
        kind:         kind.to_string(),
        output_width: d_out,
        params,
    }
}

fn block_layers<B: Backend>(c: &mut LayerCounter, block: &DenseBlock<B>) -> Vec<LayerSummary> {
    let dense = dense_layer(c, &block.linear, "Dense");
    let width = dense.output_width;
    vec![
        dense,
        LayerSummary {
            name:         LayerCounter::name(&mut c.leaky, "leaky_re_lu"),
            kind:         format!("LeakyReLU({})", block.activation.negative_slope),
            output_width: width,
            params:       0,
        },
        LayerSummary {
            name:         LayerCounter::name(&mut c.drop, "dropout"),
            kind:         format!("Dropout({})", block.dropout.prob),
            output_width: width,
            params:       0,
        },
    ]
}

fn summarise<B: Backend>(
    name:        &str,
    input_width: usize,
    hidden:      &[DenseBlock<B>],
    output:    &Linear<B>,
    out_kind:  &str,
    total:     usize,
    optimizer: OptimizerSettings,
) -> NetworkSummary {
    let mut counter = LayerCounter::new();

    let mut layers: Vec<LayerSummary> = hidden
        .iter()
        .flat_map(|block| block_layers(&mut counter, block))
        .collect();
    layers.push(dense_layer(&mut counter, output, out_kind));

    NetworkSummary {
        name: name.to_string(),
        input_width,
        layers,
        total_params: total,
        optimizer,
        loss: LOSS_NAME,
    }
}

pub fn generator_summary<B: AutodiffBackend>(generator: &Generator<B>) -> NetworkSummary {
    let net: &GeneratorNet<B> = generator.net();
    summarise(
        "generator",
        generator.noise_dim(),
        &net.hidden,
        &net.output,
        "Dense",
        net.num_params(),
        generator.optimizer(),
    )
}

pub fn discriminator_summary<B: AutodiffBackend>(discriminator: &Discriminator<B>) -> NetworkSummary {
    let net: &DiscriminatorNet<B> = discriminator.net();
    summarise(
        "discriminator",
        discriminator.feature_dim(),
        &net.hidden,
        &net.output,
        "Dense(sigmoid)",
        net.num_params(),
        discriminator.optimizer(),
    )
}

// ─── Display ──────────────────────────────────────────────────────────────────
impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "_".repeat(64);
        writeln!(f, "Model: \"{}\"", self.name)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "{:<36}{:<16}{:>12}", "Layer (type)", "Output Shape", "Param #")?;
        writeln!(f, "{}", "=".repeat(64))?;
        writeln!(f, "{:<36}{:<16}{:>12}", "input (Input)", format!("(None, {})", self.input_width), 0)?;
        for layer in &self.layers {
            writeln!(
                f,
                "{:<36}{:<16}{:>12}",
                format!("{} ({})", layer.name, layer.kind),
                format!("(None, {})", layer.output_width),
                layer.params
            )?;
        }
        writeln!(f, "{}", "=".repeat(64))?;
        writeln!(f, "Total params: {}", self.total_params)?;
        writeln!(f, "Optimizer: {}", self.optimizer)?;
        writeln!(f, "Loss: {}", self.loss)?;
        write!(f, "{rule}")
    }
}

impl fmt::Display for ModelsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.generator)?;
        writeln!(f)?;
        write!(f, "{}", self.discriminator)
    }
}
