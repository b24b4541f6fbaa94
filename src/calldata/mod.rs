//! Calldata retrieval from the space API.
//!
//! # Data Flow
//! ```text
//! ContentId + Network
//!     → client.rs (POST {base}/space/{space_id}/edit/calldata)
//!     → Calldata { to, data }
//!     → blockchain subsystem (or printed for manual submission)
//! ```
//!
//! # Design Decisions
//! - Single attempt, no retry or backoff
//! - The response text is always captured before parsing so failures can
//!   report exactly what the API said

pub mod client;
pub mod types;

pub use client::CalldataClient;
pub use types::{Calldata, CalldataError, CalldataResult, Network};
