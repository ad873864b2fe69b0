// ============================================================
// Layer 6 — Session Log
// ============================================================
// One plain-text file per training session:
//
//   <log_dir>/log <session timestamp>.txt
//
// The file is created (empty) when the session starts. Each
// progress line is written by opening the file in append mode,
// writing the line and closing it again, so every line that was
// reported as written is on disk even if the process dies later.
//
// Example contents:
//   2026-10-18 14h02m51s epoch 100 of 500
//   2026-10-18 14h03m40s epoch 200 of 500

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};

use crate::error::GanError;

/// Timestamp format used in file names and log lines.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %Hh%Mm%Ss";

pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Debug, Clone)]
pub struct SessionLog {
    path:    PathBuf,
    started: String,
}

impl SessionLog {
    /// Create `dir` if needed and start an empty session file stamped with `started`.
    pub fn create(dir: impl AsRef<Path>, started: DateTime<Local>) -> Result<Self, GanError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| GanError::resource(dir, e))?;

        let started = format_timestamp(&started);
        let path    = dir.join(format!("log {started}.txt"));

        // Truncates: two sessions started in the same second share this file.
        fs::File::create(&path).map_err(|e| GanError::resource(&path, e))?;
        tracing::info!("{} created: session log '{}'", started, path.display());

        Ok(Self { path, started })
    }

    /// Append `<now> epoch <epoch> of <epochs>`.
    pub fn record(&self, epoch: usize, epochs: usize) -> Result<(), GanError> {
        let line = format!("{} epoch {} of {}", format_timestamp(&Local::now()), epoch, epochs);
        self.append(&line)
    }

    fn append(&self, line: &str) -> Result<(), GanError> {
        let mut f = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| GanError::resource(&self.path, e))?;

        writeln!(f, "{line}").map_err(|e| GanError::resource(&self.path, e))?;
        Ok(())
    }

    pub fn path(&self) -> &Path { &self.path }

    /// Session-start timestamp as it appears in the file name.
    pub fn started(&self) -> &str { &self.started }

    /// Read back every line written so far.
    pub fn lines(&self) -> Result<Vec<String>, GanError> {
        let text = fs::read_to_string(&self.path).map_err(|e| GanError::resource(&self.path, e))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}
