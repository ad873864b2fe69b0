#![recursion_limit = "256"]

pub mod application;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;

pub use config::{GanConfig, OptimizerSettings};
pub use domain::archive::{OutputArchive, SampleBatch};
pub use domain::matrix::TrainingMatrix;
pub use domain::update::{UpdateReport, UpdateTarget};
pub use error::GanError;
pub use ml::summary::ModelsSummary;
pub use ml::trainer::{DefaultBackend, Gan};
