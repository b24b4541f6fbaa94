//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a pipeline run.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::calldata::Network;

/// Root configuration for the edit publisher.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PipelineConfig {
    /// Target space and network.
    pub space: SpaceConfig,

    /// Calldata API settings.
    pub api: ApiConfig,

    /// Content-addressed store settings.
    pub ipfs: IpfsConfig,

    /// Blockchain submission settings.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// The space an edit is applied to.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpaceConfig {
    /// Space (namespace) identifier.
    pub space_id: String,

    /// Network the space lives on.
    pub network: Network,
}

impl Default for SpaceConfig {
    fn default() -> Self {
        Self {
            space_id: "MucL11M5HLWvLSVryrNKPB".to_string(),
            network: Network::Mainnet,
        }
    }
}

/// Calldata API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the calldata API (e.g., "https://api-testnet.grc-20.thegraph.com").
    pub base_url: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-testnet.grc-20.thegraph.com".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Content-addressed store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IpfsConfig {
    /// Base URL of the upload API; edits are POSTed to `{api_url}/ipfs/upload-edit`.
    pub api_url: String,

    /// Upload timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api-testnet.grc-20.thegraph.com".to_string(),
            request_timeout_secs: 60,
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Fixed gas limit for the edit transaction.
    pub gas_limit: u64,

    /// Number of block confirmations to wait for (1 = included in a block).
    pub confirmation_blocks: u32,

    /// Receipt polling interval in milliseconds.
    pub poll_interval_ms: u64,

    /// Refuse to submit above this gas price (gwei). Unset means no limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_gas_price_gwei: Option<u64>,
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "https://rpc.ankr.com/eth".to_string(),
            failover_urls: Vec::new(),
            chain_id: 1,
            rpc_timeout_secs: 10,
            gas_limit: 300_000,
            confirmation_blocks: 1,
            poll_interval_ms: 2000,
            max_gas_price_gwei: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
