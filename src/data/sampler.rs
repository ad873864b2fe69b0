// ============================================================
// Layer 4 — Real Row Sampler
// ============================================================
// Draws the "real" half of each discriminator batch: `batch_size`
// row indices picked uniformly at random WITH replacement, then the
// rows gathered into one row-major buffer.

use rand::Rng;

use crate::domain::matrix::TrainingMatrix;

/// `count` indices uniform in `0..rows`, with replacement.
pub fn sample_indices<R: Rng + ?Sized>(rng: &mut R, rows: usize, count: usize) -> Vec<usize> {
    (0..count).map(|_| rng.gen_range(0..rows)).collect()
}

/// Concatenate the selected rows, in index order.
pub fn gather_rows(matrix: &TrainingMatrix, indices: &[usize]) -> Vec<f32> {
    let mut out = Vec::with_capacity(indices.len() * matrix.cols());
    for &i in indices {
        out.extend_from_slice(matrix.row(i));
    }
    out
}

/// Sample `count` rows with replacement and return them row-major.
pub fn sample_rows<R: Rng + ?Sized>(rng: &mut R, matrix: &TrainingMatrix, count: usize) -> Vec<f32> {
    let indices = sample_indices(rng, matrix.rows(), count);
    tracing::trace!("sampled real rows {:?}", indices);
    gather_rows(matrix, &indices)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_indices_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let idx     = sample_indices(&mut rng, 5, 200);
        assert_eq!(idx.len(), 200);
        assert!(idx.iter().all(|&i| i < 5));
    }

    #[test]
    fn test_sampling_is_with_replacement() {
        // more draws than rows forces repeats
        let mut rng = StdRng::seed_from_u64(7);
        let idx     = sample_indices(&mut rng, 3, 10);
        let mut unique = idx.clone();
        unique.sort_unstable();
        unique.dedup();
        assert!(unique.len() < idx.len());
    }

    #[test]
    fn test_gather_rows_order() {
        let m = TrainingMatrix::from_rows(vec![vec![0.0, 0.5], vec![1.0, 1.5], vec![2.0, 2.5]]).unwrap();
        assert_eq!(gather_rows(&m, &[2, 0, 2]), vec![2.0, 2.5, 0.0, 0.5, 2.0, 2.5]);
    }

    #[test]
    fn test_sample_rows_width() {
        let m       = TrainingMatrix::new(4, 3, (0..12).map(|v| v as f32).collect()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sample_rows(&mut rng, &m, 6).len(), 18);
    }
}
