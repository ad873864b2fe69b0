// ============================================================
// Layer 3 — Output Archive
// ============================================================
// Snapshots of generator output captured during training, kept
// for downstream plotting. Keys look like "epoch 100" and stay in
// the order they were first inserted; writing an existing key
// replaces its batch in place. Entries are never evicted.

use serde::{ser::SerializeStruct, Serialize, Serializer};

/// One batch of generated rows, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBatch {
    rows:   usize,
    cols:   usize,
    values: Vec<f32>,
}

impl SampleBatch {
    /// Caller guarantees `values.len() == rows * cols`.
    pub fn new(rows: usize, cols: usize, values: Vec<f32>) -> Self {
        debug_assert_eq!(values.len(), rows * cols);
        Self { rows, cols, values }
    }

    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.cols;
        &self.values[start..start + self.cols]
    }

    pub fn values(&self) -> &[f32] { &self.values }
}

impl Serialize for SampleBatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SampleBatch", 2)?;
        s.serialize_field("shape", &[self.rows, self.cols])?;
        s.serialize_field("values", &self.values)?;
        s.end()
    }
}

/// Insertion-ordered mapping from epoch key to generated batch.
#[derive(Debug, Clone, Default)]
pub struct OutputArchive {
    entries: Vec<(String, SampleBatch)>,
}

impl OutputArchive {
    pub fn new() -> Self { Self::default() }

    /// Archive key for a given epoch.
    pub fn key_for(epoch: usize) -> String {
        format!("epoch {epoch}")
    }

    /// Insert or overwrite. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, batch: SampleBatch) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = batch,
            None                => self.entries.push((key, batch)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&SampleBatch> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, b)| b)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SampleBatch)> {
        self.entries.iter().map(|(k, b)| (k.as_str(), b))
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl Serialize for OutputArchive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, b)| (k, b)))
    }
}
