//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All stages produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (per-stage counters and durations)
//!
//! Consumers:
//!     → stdout (fmt layer, filtered by RUST_LOG or config)
//!     → any `metrics` recorder the embedding process installs
//! ```
//!
//! # Design Decisions
//! - Stage names are shared between logs and metric labels
//! - Without an installed recorder, metric updates are no-ops

pub mod logging;
pub mod metrics;
