// ============================================================
// Layer 3 — Update Reports
// ============================================================
// Every parameter update (discriminator-only or composite) returns
// an UpdateReport. The trainable flag is read inside the update
// call itself, so a report shows the flag as the update saw it.

use std::fmt;

/// Which network a parameter update was routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    /// Discriminator-only update on the real + synthetic batch
    Discriminator,
    /// Generator update through the noise → G → D pipeline
    Composite,
}

impl fmt::Display for UpdateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateTarget::Discriminator => write!(f, "discriminator"),
            UpdateTarget::Composite     => write!(f, "composite"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub target: UpdateTarget,

    /// Discriminator trainable flag observed during the update
    pub discriminator_trainable: bool,

    /// Rows in the batch the update ran on
    pub rows: usize,

    /// Binary cross-entropy of the batch before the step
    pub loss: f32,
}
