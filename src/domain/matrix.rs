// ============================================================
// Layer 3 — Training Matrix
// ============================================================
// Row-major numeric matrix: rows are samples, columns are the
// features the generator learns to reproduce. The GAN holds it
// behind an `Arc` so the caller keeps ownership and nothing is
// copied when training starts.

use serde::{Deserialize, Serialize};

use crate::error::GanError;

/// Immutable row-major matrix of training samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingMatrix {
    rows:   usize,
    cols:   usize,
    values: Vec<f32>,
}

impl TrainingMatrix {
    /// Wrap a flat row-major buffer. Fails if `values.len() != rows * cols`.
    ///
    /// An empty shape is accepted here; `Gan::build` is the place that
    /// rejects matrices without rows or feature columns.
    pub fn new(rows: usize, cols: usize, values: Vec<f32>) -> Result<Self, GanError> {
        if values.len() != rows * cols {
            return Err(GanError::Configuration(format!(
                "training matrix of shape ({rows}, {cols}) needs {} values, got {}",
                rows * cols,
                values.len()
            )));
        }
        Ok(Self { rows, cols, values })
    }

    /// Build from a list of rows. Every row must have the same width.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, GanError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let n    = rows.len();
        let mut values = Vec::with_capacity(n * cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GanError::Configuration(format!(
                    "row {i} has {} columns, expected {cols}",
                    row.len()
                )));
            }
            values.extend(row);
        }

        Self::new(n, cols, values)
    }

    pub fn rows(&self) -> usize { self.rows }

    /// Feature dimensionality `D`.
    pub fn cols(&self) -> usize { self.cols }

    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn values(&self) -> &[f32] { &self.values }
}
