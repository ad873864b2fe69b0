//! Error type for every fallible GAN operation.
//!
//! All variants are fatal to a training run: nothing is retried and
//! nothing is downgraded to a warning.

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::update::UpdateTarget;

#[derive(Debug, Error)]
pub enum GanError {
    /// Invalid dimensionality or run argument, or a misuse of the
    /// discriminator's trainable flag.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A parameter update produced a non-finite loss.
    #[error("numeric instability in {target} update: loss = {loss}")]
    NumericInstability { target: UpdateTarget, loss: f32 },

    /// Log directory creation or log/output file write failed.
    #[error("resource error at '{}': {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading tensor data back from the backend failed.
    #[error("tensor data error: {0}")]
    TensorData(String),
}

impl GanError {
    pub(crate) fn resource(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GanError::Resource { path: path.into(), source }
    }
}
