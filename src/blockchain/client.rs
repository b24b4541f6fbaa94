//! JSON-RPC access to the chain the space contract lives on.
//!
//! Reads go to the primary endpoint first and fall back to the configured
//! failover endpoints, each attempt bounded by `rpc_timeout_secs`. Broadcasts
//! go to the primary alone.

use alloy::primitives::{Address, TxHash};
use alloy::providers::{Provider, ProviderBuilder};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, ReceiptSummary,
};

/// The node operations the transaction submitter needs.
pub trait ChainRpc {
    /// Current gas price in wei.
    fn gas_price(&self) -> impl Future<Output = BlockchainResult<u128>> + Send;

    /// Transaction count (next nonce) of `address`.
    fn transaction_count(&self, address: Address) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Latest block number.
    fn block_number(&self) -> impl Future<Output = BlockchainResult<u64>> + Send;

    /// Broadcast an EIP-2718 encoded transaction.
    fn send_raw_transaction(&self, raw: &[u8]) -> impl Future<Output = BlockchainResult<TxHash>> + Send;

    /// Receipt of a mined transaction, `None` while pending.
    fn transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> impl Future<Output = BlockchainResult<Option<ReceiptSummary>>> + Send;
}

type SharedProvider = Arc<dyn Provider + Send + Sync>;

/// alloy HTTP providers, primary first.
#[derive(Clone)]
pub struct BlockchainClient {
    providers: Vec<SharedProvider>,
    config: BlockchainConfig,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Connect to `config.rpc_url` and its failovers.
    ///
    /// An unparsable primary URL is an error. Invalid failover URLs are
    /// skipped, and a chain id mismatch is only logged.
    pub async fn new(config: BlockchainConfig) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let mut providers = vec![connect(primary_url)];

        for url_str in &config.failover_urls {
            match url_str.parse() {
                Ok(url) => providers.push(connect(url)),
                Err(_) => tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL"),
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        if let Err(e) = client.verify_chain_id().await {
            tracing::warn!(error = %e, "Chain verification failed; submission may be rejected");
        } else {
            tracing::info!(
                rpc_url = %config.rpc_url,
                chain_id = config.chain_id,
                failovers = client.providers.len() - 1,
                "Blockchain client ready"
            );
        }

        Ok(client)
    }

    /// Fails with `ChainMismatch` when the node serves a different chain.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id.0 != self.config.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Chain id reported by the first responsive provider.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("chain id", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }

    /// Run `call` against each provider in order until one answers in time.
    async fn with_failover<T, E, F, Fut>(&self, operation: &'static str, call: F) -> BlockchainResult<T>
    where
        F: Fn(SharedProvider) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut last_error = String::from("no providers configured");
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, call(provider.clone())).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, operation, error = %e, "RPC error, trying next provider");
                    last_error = e.to_string();
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, operation, "RPC timeout, trying next provider");
                    last_error = format!("timed out after {}s", self.timeout_duration.as_secs());
                }
            }
        }
        Err(BlockchainError::Rpc(format!(
            "{} failed on all providers: {}",
            operation, last_error
        )))
    }
}

impl ChainRpc for BlockchainClient {
    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.with_failover("gas price", |p| async move { p.get_gas_price().await })
            .await
    }

    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.with_failover("transaction count", |p| async move {
            p.get_transaction_count(address).await
        })
        .await
    }

    async fn block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("block number", |p| async move { p.get_block_number().await })
            .await
    }

    /// Sent to the primary only. A signed transaction is never re-sent to a
    /// failover, since the primary may have accepted it before failing.
    async fn send_raw_transaction(&self, raw: &[u8]) -> BlockchainResult<TxHash> {
        let provider = self
            .providers
            .first()
            .ok_or_else(|| BlockchainError::Rpc("no providers configured".to_string()))?;

        match timeout(self.timeout_duration, provider.send_raw_transaction(raw)).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Broadcast rejected");
                Err(BlockchainError::Rpc(format!("broadcast failed: {}", e)))
            }
            Err(_) => {
                tracing::error!("Broadcast timed out; the transaction may still be mined");
                Err(BlockchainError::Rpc(format!(
                    "broadcast timed out after {}s",
                    self.timeout_duration.as_secs()
                )))
            }
        }
    }

    async fn transaction_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<ReceiptSummary>> {
        let receipt = self
            .with_failover("receipt", |p| async move {
                p.get_transaction_receipt(tx_hash).await
            })
            .await?;

        Ok(receipt.map(|receipt| ReceiptSummary {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            success: receipt.status(),
            gas_used: receipt.gas_used,
        }))
    }
}

fn connect(url: url::Url) -> SharedProvider {
    Arc::new(ProviderBuilder::new().connect_http(url))
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> BlockchainConfig {
        BlockchainConfig {
            rpc_url: "http://127.0.0.1:9".to_string(),
            chain_id: 31337, // Anvil default
            rpc_timeout_secs: 2,
            ..BlockchainConfig::default()
        }
    }

    #[tokio::test]
    async fn test_client_creation() {
        // Client creation should succeed even if RPC is unreachable
        let result = BlockchainClient::new(test_config()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_primary_url() {
        let mut config = test_config();
        config.rpc_url = "not a url".to_string();
        let result = BlockchainClient::new(config).await;
        assert!(matches!(result, Err(BlockchainError::Rpc(_))));
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut config = test_config();
        // Add a secondary unreachable URL
        config.failover_urls.push("http://127.0.0.1:7".to_string());

        let client = BlockchainClient::new(config).await.unwrap();

        // Both endpoints refuse connections, so every provider is tried and fails
        let result = client.get_chain_id().await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("chain id failed on all providers"));

        let result = client.gas_price().await;
        assert!(result.unwrap_err().to_string().contains("gas price"));

        let result = client.send_raw_transaction(&[0x01]).await;
        assert!(matches!(result, Err(BlockchainError::Rpc(_))));
    }
}
