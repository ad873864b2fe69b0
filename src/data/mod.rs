// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the caller's matrix and the tensors an
// update consumes:
//
//   CSV file ──► CsvMatrixLoader ──► TrainingMatrix
//                                        │
//                       sampler (rows, with replacement)
//                                        │
//   NoiseSource ──► Generator ──► synthetic rows
//                                        │
//                              DiscriminatorBatcher
//                                        │
//                          [2b, D] features + [2b, 1] labels

/// Loads a numeric CSV into a TrainingMatrix
pub mod loader;

/// Uniform row sampling with replacement
pub mod sampler;

/// Standard-normal noise batches
pub mod noise;

/// Stacks real + synthetic rows and builds label tensors
pub mod batcher;
