//! Calldata request/response types and error definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Network label understood by the calldata API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "MAINNET",
            Network::Testnet => "TESTNET",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of the calldata request.
#[derive(Debug, Clone, Serialize)]
pub struct CalldataRequest<'a> {
    pub cid: &'a str,
    pub network: Network,
}

/// Destination address and payload for the edit transaction, verbatim as
/// returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calldata {
    pub to: String,
    pub data: String,
}

/// Wire shape of the API response before the required fields are checked.
#[derive(Debug, Deserialize)]
pub(crate) struct RawCalldata {
    pub to: Option<String>,
    pub data: Option<String>,
}

impl RawCalldata {
    pub(crate) fn into_calldata(self) -> Option<Calldata> {
        let to = self.to.filter(|s| !s.is_empty())?;
        let data = self.data.filter(|s| !s.is_empty())?;
        Some(Calldata { to, data })
    }
}

/// Errors that can occur while fetching calldata.
#[derive(Debug, Error)]
pub enum CalldataError {
    /// The API base URL is not a valid URL.
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Transport-level failure talking to the API.
    #[error("Space API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Space API failed: {status} {reason}\nResponse: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },

    /// The API answered 2xx with a body that is not JSON.
    #[error("Failed to parse response as JSON: {body}")]
    InvalidJson { body: String },

    /// The API answered without `to` or `data`.
    #[error("Space API response missing required fields (to, data): {body}")]
    MissingFields { body: String },
}

/// Result type for calldata operations.
pub type CalldataResult<T> = Result<T, CalldataError>;
