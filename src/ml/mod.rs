// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn network, loss and optimizer code lives here. The data
// layer only builds tensors; the application layer only calls
// the `Gan` facade.
//
//   model.rs       — generator and discriminator architectures
//   network.rs     — compiled networks, the trainable flag and
//                    the frozen discriminator view
//   adversarial.rs — composite noise → G → D pipeline that
//                    updates the generator only
//   trainer.rs     — `Gan` facade and the alternating training loop
//   inferencer.rs  — inference-mode sampling for snapshots
//   summary.rs     — per-layer model descriptions
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Goodfellow et al. (2014) Generative Adversarial Nets

/// Generator and discriminator architectures
pub mod model;

/// Networks compiled with their optimizer settings
pub mod network;

/// Generator-through-frozen-discriminator pipeline
pub mod adversarial;

/// `Gan` facade and adversarial training loop
pub mod trainer;

/// Sampling from the generator in inference mode
pub mod inferencer;

/// Human-readable model descriptions
pub mod summary;
