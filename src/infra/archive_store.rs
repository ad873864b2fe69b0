// ============================================================
// Layer 6 — Archive Store
// ============================================================
// Writes training output for downstream plotting:
//
//   <output_dir>/
//     archive.json     ← {"epoch 100": {"shape": [42, 5], "values": [...]}, ...}
//     run_config.json  ← the GanConfig the run used
//
// Only generated samples and settings are written; network
// weights never leave the process.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::config::GanConfig;
use crate::domain::archive::OutputArchive;

pub const ARCHIVE_FILE: &str = "archive.json";
pub const CONFIG_FILE:  &str = "run_config.json";

pub struct ArchiveStore {
    dir: PathBuf,
}

impl ArchiveStore {
    /// Creates the directory if it doesn't already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create output directory '{}'", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn save_archive(&self, archive: &OutputArchive) -> Result<PathBuf> {
        let path = self.dir.join(ARCHIVE_FILE);
        let json = serde_json::to_string(archive)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write archive to '{}'", path.display()))?;

        tracing::info!("Saved {} snapshots to '{}'", archive.len(), path.display());
        Ok(path)
    }

    pub fn save_config(&self, cfg: &GanConfig) -> Result<PathBuf> {
        let path = self.dir.join(CONFIG_FILE);
        let json = serde_json::to_string_pretty(cfg)?;

        fs::write(&path, json)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved run config to '{}'", path.display());
        Ok(path)
    }
}
