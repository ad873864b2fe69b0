// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system side effects of a training run:
//
//   session_log.rs   — the per-session progress log
//                      (log/log <timestamp>.txt, one line per trace event)
//
//   archive_store.rs — exports the Output Archive and the run
//                      configuration as JSON for plotting

/// Per-session append-only progress log
pub mod session_log;

/// JSON export of generated snapshots and run settings
pub mod archive_store;
