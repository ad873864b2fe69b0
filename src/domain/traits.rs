// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================

use anyhow::Result;

use crate::domain::matrix::TrainingMatrix;
use crate::domain::update::UpdateReport;

// ─── MatrixSource ─────────────────────────────────────────────────────────────
/// Anything that can hand the trainer a training matrix.
///
/// Implementations:
///   - CsvMatrixLoader → numeric CSV file on disk
pub trait MatrixSource {
    fn load(&self) -> Result<TrainingMatrix>;
}

// ─── UpdateObserver ───────────────────────────────────────────────────────────
/// Receives a report after every parameter update of the training loop,
/// in the order the updates ran.
pub trait UpdateObserver {
    fn on_update(&mut self, report: &UpdateReport);
}

/// Observer that ignores every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl UpdateObserver for NoopObserver {
    fn on_update(&mut self, _report: &UpdateReport) {}
}

/// Observer that keeps every report, in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    pub reports: Vec<UpdateReport>,
}

impl UpdateObserver for RecordingObserver {
    fn on_update(&mut self, report: &UpdateReport) {
        self.reports.push(report.clone());
    }
}
