//! Content identifiers, the store trait and publish errors.

use cid::Cid;
use multihash_codetable::{Code, MultihashDigest};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;

use crate::schema::Edit;

/// Multicodec for raw bytes.
const RAW_CODEC: u64 = 0x55;

/// Opaque reference to a published edit, as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(cid: impl Into<String>) -> Self {
        Self(cid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the CIDv1 (raw codec, sha2-256) of `bytes`, in `ipfs://` form.
pub fn content_id_for(bytes: &[u8]) -> ContentId {
    let hash = Code::Sha2_256.digest(bytes);
    ContentId(format!("ipfs://{}", Cid::new_v1(RAW_CODEC, hash)))
}

/// Errors that can occur while publishing an edit.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The edit could not be encoded.
    #[error("Failed to serialize edit: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store endpoint is not a valid URL.
    #[error("Invalid store URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure talking to the store.
    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("Store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered 2xx but without a usable CID.
    #[error("Store response missing cid: {body}")]
    MissingCid { body: String },
}

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// A content-addressed store that accepts edits.
pub trait EditStore {
    /// Upload `edit` and return the identifier the store assigned to it.
    fn publish(&self, edit: &Edit) -> impl Future<Output = PublishResult<ContentId>> + Send;
}
