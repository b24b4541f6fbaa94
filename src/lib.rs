//! GRC-20 edit publishing library.
//!
//! Builds knowledge-graph edits, publishes them to a content store, fetches
//! the calldata that records them in a space, and optionally signs and
//! broadcasts that transaction.

pub mod blockchain;
pub mod calldata;
pub mod config;
pub mod observability;
pub mod pipeline;
pub mod presets;
pub mod publish;
pub mod schema;

pub use config::schema::PipelineConfig;
pub use pipeline::{Pipeline, PipelineError, RunSummary};
pub use presets::Preset;
