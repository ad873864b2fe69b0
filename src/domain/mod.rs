// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types that describe what the GAN works on and what
// it produces. Nothing in here depends on burn, so every type can
// be built and tested without a backend.
//
//   matrix.rs  — the caller's training matrix (rows × features)
//   archive.rs — generated-sample snapshots keyed by epoch
//   update.rs  — what one parameter update reports back
//   traits.rs  — seams the other layers implement

/// Training matrix supplied by the caller
pub mod matrix;

/// Insertion-ordered epoch → generated batch mapping
pub mod archive;

/// Report emitted by every discriminator / composite update
pub mod update;

/// Core abstractions (traits) that other layers implement
pub mod traits;
