// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Runs the full pipeline in order:
//
//   Step 1: Load the CSV matrix       (Layer 4 - data)
//   Step 2: Build the GAN             (Layer 5 - ml, opens the session log)
//   Step 3: Describe the networks     (Layer 5 - ml)
//   Step 4: Save the run config       (Layer 6 - infra)
//   Step 5: Train                     (Layer 5 - ml)
//   Step 6: Export the archive        (Layer 6 - infra)
//
// Reference: Burn Book §5 (Training)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::GanConfig;
use crate::data::loader::CsvMatrixLoader;
use crate::domain::traits::MatrixSource;
use crate::infra::archive_store::ArchiveStore;
use crate::ml::summary::ModelsSummary;
use crate::ml::trainer::{DefaultBackend, Gan};

/// Everything a training run needs, already resolved from the CLI.
#[derive(Debug, Clone)]
pub struct TrainRequest {
    pub data:        PathBuf,
    pub has_headers: bool,
    pub output_dir:  PathBuf,
    pub config:      GanConfig,
}

/// What a finished run produced.
#[derive(Debug)]
pub struct TrainOutcome {
    pub summary:      ModelsSummary,
    pub snapshots:    usize,
    pub archive_path: PathBuf,
    pub log_path:     PathBuf,
}

pub struct TrainUseCase {
    request: TrainRequest,
}

impl TrainUseCase {
    pub fn new(request: TrainRequest) -> Self {
        Self { request }
    }

    pub fn execute(&self) -> Result<TrainOutcome> {
        let req = &self.request;
        let cfg = &req.config;

        // ── Step 1: Load the training matrix ─────────────────────────────────
        let loader = CsvMatrixLoader::new(&req.data).with_headers(req.has_headers);
        let matrix = Arc::new(loader.load()?);

        // ── Step 2: Build generator, discriminator and composite ─────────────
        let mut gan = Gan::<DefaultBackend>::build(matrix, cfg.clone(), Default::default())
            .context("Failed to build the GAN")?;

        // ── Step 3: Describe ─────────────────────────────────────────────────
        let summary = gan.describe_models();

        // ── Step 4: Save the run config next to the archive ──────────────────
        let store = ArchiveStore::new(&req.output_dir)?;
        store.save_config(cfg)?;

        // ── Step 5: Train ────────────────────────────────────────────────────
        let (epochs, batch_size) = (gan.config().epochs, gan.config().batch_size);
        gan.train(epochs, batch_size)
            .with_context(|| format!("Training failed during a {epochs}-epoch run"))?;

        // ── Step 6: Export snapshots ─────────────────────────────────────────
        let archive_path = store.save_archive(gan.output_archive())?;

        Ok(TrainOutcome {
            summary,
            snapshots: gan.output_archive().len(),
            archive_path,
            log_path: gan.session_log().path().to_path_buf(),
        })
    }
}
