// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Two subcommands: `train` and `describe`.
//
// clap's derive macros generate the --help text, the errors for
// missing args and the string → number conversions.
//
// Reference: Rust Book §12 (Building a CLI Program)

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::application::describe_use_case::DescribeRequest;
use crate::application::train_use_case::TrainRequest;
use crate::config::{self, GanConfig, OptimizerSettings};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the GAN on a numeric CSV file and export the snapshots
    Train(TrainArgs),

    /// Print the generator and discriminator layouts for a CSV file
    Describe(DescribeArgs),
}

/// Arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Numeric CSV file; one training row per record
    #[arg(long)]
    pub data: PathBuf,

    /// Skip the first record of the CSV file
    #[arg(long)]
    pub has_headers: bool,

    #[arg(long, default_value_t = config::DEFAULT_EPOCHS)]
    pub epochs: usize,

    /// Rows per half-batch; also the number of steps per epoch
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Log and snapshot every this many epochs
    #[arg(long, default_value_t = config::DEFAULT_TRACE_INTERVAL)]
    pub trace: usize,

    #[arg(long, default_value_t = config::DEFAULT_NOISE_DIM)]
    pub noise_dim: usize,

    #[arg(long, default_value_t = config::DEFAULT_PLOT_LAYOUT.0)]
    pub plot_rows: usize,

    #[arg(long, default_value_t = config::DEFAULT_PLOT_LAYOUT.1)]
    pub plot_cols: usize,

    /// Directory for the session log file
    #[arg(long, default_value = "log")]
    pub log_dir: PathBuf,

    /// Directory for archive.json and run_config.json
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Fix the random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = 0.2)]
    pub generator_lr: f64,

    #[arg(long, default_value_t = 0.2)]
    pub discriminator_lr: f64,

    /// First-moment decay for both sub-network optimizers
    #[arg(long, default_value_t = 0.5)]
    pub beta1: f32,

    /// Compile both sub-networks with Adam's library defaults instead
    #[arg(long)]
    pub default_optimizer: bool,
}

impl TrainArgs {
    fn optimizer(&self, learning_rate: f64) -> OptimizerSettings {
        if self.default_optimizer {
            OptimizerSettings::AdamDefault
        } else {
            OptimizerSettings::Adam { learning_rate, beta_1: self.beta1 }
        }
    }
}

/// Boundary between Layer 1 and Layer 2: the application layer
/// never sees clap types.
impl From<&TrainArgs> for GanConfig {
    fn from(a: &TrainArgs) -> Self {
        GanConfig {
            noise_dim:               a.noise_dim,
            trace_interval:          a.trace,
            plot_rows:               a.plot_rows,
            plot_cols:               a.plot_cols,
            log_dir:                 a.log_dir.clone(),
            seed:                    a.seed,
            epochs:                  a.epochs,
            batch_size:              a.batch_size,
            generator_optimizer:     a.optimizer(a.generator_lr),
            discriminator_optimizer: a.optimizer(a.discriminator_lr),
            ..GanConfig::default()
        }
    }
}

impl From<TrainArgs> for TrainRequest {
    fn from(a: TrainArgs) -> Self {
        TrainRequest {
            config:      GanConfig::from(&a),
            data:        a.data,
            has_headers: a.has_headers,
            output_dir:  a.output_dir,
        }
    }
}

/// Arguments for the `describe` command.
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Numeric CSV file; only its column count matters here
    #[arg(long)]
    pub data: PathBuf,

    #[arg(long)]
    pub has_headers: bool,

    #[arg(long, default_value_t = config::DEFAULT_NOISE_DIM)]
    pub noise_dim: usize,
}

impl From<DescribeArgs> for DescribeRequest {
    fn from(a: DescribeArgs) -> Self {
        DescribeRequest {
            data:        a.data,
            has_headers: a.has_headers,
            config:      GanConfig { noise_dim: a.noise_dim, ..GanConfig::default() },
        }
    }
}
