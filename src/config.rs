// ============================================================
// GAN Configuration
// ============================================================
// Every knob of a run in one serialisable struct. The CLI builds
// one from its arguments; the application layer writes it next to
// the exported archive so a run can be traced back to its settings.

use std::path::PathBuf;

use burn::optim::AdamConfig;
use serde::{Deserialize, Serialize};

use crate::error::GanError;

pub const DEFAULT_EPOCHS:         usize = 500;
pub const DEFAULT_BATCH_SIZE:     usize = 16;
pub const DEFAULT_NOISE_DIM:      usize = 1;
pub const DEFAULT_TRACE_INTERVAL: usize = 100;
pub const DEFAULT_PLOT_LAYOUT:    (usize, usize) = (7, 6);

/// Learning rate Adam uses when no explicit rate is configured.
pub const ADAM_DEFAULT_LR: f64 = 1e-3;

// ─── Optimizer Settings ───────────────────────────────────────────────────────
/// The optimizer a network is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerSettings {
    /// Adam with an explicit learning rate and first-moment decay
    Adam { learning_rate: f64, beta_1: f32 },
    /// Adam with the library defaults (lr 1e-3, beta_1 0.9)
    AdamDefault,
}

impl OptimizerSettings {
    /// Adam(lr = 0.2, beta_1 = 0.5), used for both sub-networks.
    pub fn network_default() -> Self {
        OptimizerSettings::Adam { learning_rate: 0.2, beta_1: 0.5 }
    }

    pub fn learning_rate(&self) -> f64 {
        match *self {
            OptimizerSettings::Adam { learning_rate, .. } => learning_rate,
            OptimizerSettings::AdamDefault                => ADAM_DEFAULT_LR,
        }
    }

    pub fn adam(&self) -> AdamConfig {
        match *self {
            OptimizerSettings::Adam { beta_1, .. } => AdamConfig::new().with_beta_1(beta_1),
            OptimizerSettings::AdamDefault         => AdamConfig::new(),
        }
    }

    fn validate(&self, name: &str) -> Result<(), GanError> {
        let lr = self.learning_rate();
        if !(lr.is_finite() && lr > 0.0) {
            return Err(GanError::Configuration(format!(
                "{name} learning rate must be positive, got {lr}"
            )));
        }
        if let OptimizerSettings::Adam { beta_1, .. } = *self {
            if !(0.0..1.0).contains(&beta_1) {
                return Err(GanError::Configuration(format!(
                    "{name} beta_1 must lie in [0, 1), got {beta_1}"
                )));
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for OptimizerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptimizerSettings::Adam { learning_rate, beta_1 } => {
                write!(f, "Adam(lr={learning_rate}, beta_1={beta_1})")
            }
            OptimizerSettings::AdamDefault => write!(f, "Adam(default, lr={ADAM_DEFAULT_LR})"),
        }
    }
}

// ─── GanConfig ────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanConfig {
    /// Width of each noise vector fed to the generator
    pub noise_dim: usize,

    /// Log a line and snapshot the generator every this many epochs
    pub trace_interval: usize,

    /// Snapshot layout; each snapshot holds plot_rows × plot_cols samples
    pub plot_rows: usize,
    pub plot_cols: usize,

    /// Directory holding the session log file
    pub log_dir: PathBuf,

    /// Seeds the backend RNG and the row sampler when set
    pub seed: Option<u64>,

    /// Run length used by the CLI when no override is given
    pub epochs:     usize,
    pub batch_size: usize,

    pub generator_optimizer:     OptimizerSettings,
    pub discriminator_optimizer: OptimizerSettings,
    /// Optimizer of the noise → G → D pipeline (drives generator updates)
    pub composite_optimizer:     OptimizerSettings,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            noise_dim:               DEFAULT_NOISE_DIM,
            trace_interval:          DEFAULT_TRACE_INTERVAL,
            plot_rows:               DEFAULT_PLOT_LAYOUT.0,
            plot_cols:               DEFAULT_PLOT_LAYOUT.1,
            log_dir:                 PathBuf::from("log"),
            seed:                    None,
            epochs:                  DEFAULT_EPOCHS,
            batch_size:              DEFAULT_BATCH_SIZE,
            generator_optimizer:     OptimizerSettings::network_default(),
            discriminator_optimizer: OptimizerSettings::network_default(),
            composite_optimizer:     OptimizerSettings::AdamDefault,
        }
    }
}

impl GanConfig {
    /// Number of samples drawn per snapshot.
    pub fn samples_per_snapshot(&self) -> usize {
        self.plot_rows * self.plot_cols
    }

    pub fn validate(&self) -> Result<(), GanError> {
        if self.noise_dim == 0 {
            return Err(GanError::Configuration("noise dimension must be positive".into()));
        }
        if self.trace_interval == 0 {
            return Err(GanError::Configuration("trace interval must be positive".into()));
        }
        if self.plot_rows == 0 || self.plot_cols == 0 {
            return Err(GanError::Configuration(format!(
                "plot layout must be positive, got ({}, {})",
                self.plot_rows, self.plot_cols
            )));
        }
        self.generator_optimizer.validate("generator")?;
        self.discriminator_optimizer.validate("discriminator")?;
        self.composite_optimizer.validate("composite")?;
        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GanConfig::default();
        assert_eq!(cfg.noise_dim, 1);
        assert_eq!(cfg.trace_interval, 100);
        assert_eq!(cfg.samples_per_snapshot(), 42);
        assert_eq!(cfg.epochs, 500);
        assert_eq!(cfg.batch_size, 16);
        assert_eq!(cfg.composite_optimizer, OptimizerSettings::AdamDefault);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_noise_dim_rejected() {
        let cfg = GanConfig { noise_dim: 0, ..GanConfig::default() };
        assert!(matches!(cfg.validate(), Err(GanError::Configuration(_))));
    }

    #[test]
    fn test_zero_trace_interval_rejected() {
        let cfg = GanConfig { trace_interval: 0, ..GanConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_bad_beta_rejected() {
        let cfg = GanConfig {
            discriminator_optimizer: OptimizerSettings::Adam { learning_rate: 0.2, beta_1: 1.5 },
            ..GanConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_learning_rates() {
        assert_eq!(OptimizerSettings::network_default().learning_rate(), 0.2);
        assert_eq!(OptimizerSettings::AdamDefault.learning_rate(), ADAM_DEFAULT_LR);
    }

    #[test]
    fn test_json_round_trip_keeps_optimizer_tag() {
        let cfg  = GanConfig { seed: Some(7), ..GanConfig::default() };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains(r#""kind":"adam_default""#));
        let back: GanConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
