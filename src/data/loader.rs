// ============================================================
// Layer 4 — CSV Matrix Loader
// ============================================================
// Reads a numeric CSV file into a TrainingMatrix for the CLI
// driver. Every record must have the same number of fields and
// every field must parse as a number; anything else fails the
// load with the offending line in the error.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::domain::matrix::TrainingMatrix;
use crate::domain::traits::MatrixSource;

/// Loads a training matrix from a CSV file.
/// Implements the MatrixSource trait from Layer 3.
pub struct CsvMatrixLoader {
    path:        PathBuf,
    has_headers: bool,
}

impl CsvMatrixLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), has_headers: false }
    }

    /// Treat the first record as column names and skip it.
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }
}

impl MatrixSource for CsvMatrixLoader {
    fn load(&self) -> Result<TrainingMatrix> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .with_context(|| format!("Cannot open training data '{}'", self.path.display()))?;

        let mut rows: Vec<Vec<f32>> = Vec::new();

        for (i, record) in reader.records().enumerate() {
            let record = record
                .with_context(|| format!("Malformed CSV record {} in '{}'", i + 1, self.path.display()))?;

            let row = record
                .iter()
                .enumerate()
                .map(|(col, field)| {
                    field.parse::<f32>().with_context(|| {
                        format!("Record {}, column {}: '{}' is not a number", i + 1, col + 1, field)
                    })
                })
                .collect::<Result<Vec<f32>>>()?;

            rows.push(row);
        }

        let matrix = TrainingMatrix::from_rows(rows)?;
        tracing::info!(
            "Loaded training matrix from '{}': {} rows × {} features",
            self.path.display(),
            matrix.rows(),
            matrix.cols()
        );
        Ok(matrix)
    }
}
