//! Pipeline orchestration.
//!
//! # Data Flow
//! ```text
//! build closure (EditBuilder → Edit)
//!     → EditStore::publish          → ContentId
//!     → CalldataClient::fetch       → Calldata { to, data }
//!     → TxSubmitter::submit         → TransactionSummary   (only with a key)
//!     → RunSummary
//! ```
//!
//! # Design Decisions
//! - Strictly sequential; the first failing stage aborts the run
//! - The run returns `Result<RunSummary, PipelineError>`; the caller decides
//!   how to report it

pub mod runner;
pub mod types;

pub use runner::{run_offline, Pipeline};
pub use types::{PipelineError, RunSummary};
