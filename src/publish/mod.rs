//! Edit publishing to a content-addressed store.
//!
//! # Data Flow
//! ```text
//! Edit
//!     → Edit::to_bytes (JSON encoding)
//!     → EditStore::publish
//!         ipfs.rs   (HTTP upload, remote store assigns the CID)
//!         memory.rs (offline, CID computed locally)
//!     → ContentId
//! ```
//!
//! # Design Decisions
//! - One round-trip per edit; no chunking or partial-publish recovery
//! - Empty edits are published like any other

pub mod ipfs;
pub mod memory;
pub mod types;

pub use ipfs::IpfsPublisher;
pub use memory::MemoryStore;
pub use types::{content_id_for, ContentId, EditStore, PublishError, PublishResult};
