// ============================================================
// Layer 2 — DescribeUseCase
// ============================================================
// Builds both networks for a CSV file's column count and returns
// their layouts without training or opening a session log.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::GanConfig;
use crate::data::loader::CsvMatrixLoader;
use crate::domain::traits::MatrixSource;
use crate::ml::network::{Discriminator, Generator};
use crate::ml::summary::{discriminator_summary, generator_summary, ModelsSummary};
use crate::ml::trainer::DefaultBackend;

#[derive(Debug, Clone)]
pub struct DescribeRequest {
    pub data:        PathBuf,
    pub has_headers: bool,
    pub config:      GanConfig,
}

pub struct DescribeUseCase {
    request: DescribeRequest,
}

impl DescribeUseCase {
    pub fn new(request: DescribeRequest) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<ModelsSummary> {
        let req = &self.request;
        let cfg = &req.config;
        cfg.validate()?;

        let matrix = CsvMatrixLoader::new(&req.data)
            .with_headers(req.has_headers)
            .load()?;
        let device = Default::default();

        let generator = Generator::<DefaultBackend>::new(
            cfg.noise_dim,
            matrix.cols(),
            cfg.generator_optimizer,
            &device,
        )
        .context("Failed to build the generator")?;
        let discriminator = Discriminator::<DefaultBackend>::new(
            matrix.cols(),
            cfg.discriminator_optimizer,
            &device,
        )
        .context("Failed to build the discriminator")?;

        Ok(ModelsSummary {
            generator:     generator_summary(&generator),
            discriminator: discriminator_summary(&discriminator),
        })
    }
}
