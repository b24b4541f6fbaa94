//! Transaction building, signing, and confirmation monitoring.
//!
//! # Responsibilities
//! - Build the edit transaction from API calldata
//! - Sign and broadcast it once
//! - Monitor confirmations until the receipt is final
//!
//! # Design Decisions
//! - Fixed gas limit, network gas price, chain nonce
//! - No fee bumping or replacement; the confirmation wait has no deadline

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::interval;

use crate::blockchain::client::ChainRpc;
use crate::blockchain::types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ReceiptSummary, TransactionSummary,
    TxStatus,
};
use crate::blockchain::wallet::Wallet;
use crate::calldata::Calldata;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Signs, broadcasts and confirms edit transactions.
pub struct TxSubmitter<C> {
    client: C,
    wallet: Wallet,
    gas_limit: u64,
    confirmation_blocks: u32,
    poll_interval: Duration,
    max_gas_price_gwei: Option<u64>,
}

impl<C: ChainRpc> TxSubmitter<C> {
    /// Create a new submitter.
    pub fn new(client: C, wallet: Wallet, config: &BlockchainConfig) -> Self {
        Self {
            client,
            wallet,
            gas_limit: config.gas_limit,
            confirmation_blocks: config.confirmation_blocks.max(1),
            poll_interval: Duration::from_millis(config.poll_interval_ms.max(1)),
            max_gas_price_gwei: config.max_gas_price_gwei,
        }
    }

    /// Build the transaction request for `calldata`.
    ///
    /// # Arguments
    /// * `calldata` - Destination and payload returned by the space API
    pub async fn build(&self, calldata: &Calldata) -> BlockchainResult<TransactionRequest> {
        let to = Address::from_str(&calldata.to).map_err(|e| {
            BlockchainError::InvalidCalldata(format!("bad destination '{}': {}", calldata.to, e))
        })?;
        let data = Bytes::from_str(&calldata.data).map_err(|e| {
            BlockchainError::InvalidCalldata(format!("bad payload: {}", e))
        })?;

        // Get gas price
        let gas_price = self.client.gas_price().await?;
        let gas_price_gwei = gas_price / WEI_PER_GWEI;

        if let Some(max_gwei) = self.max_gas_price_gwei {
            if gas_price_gwei > max_gwei as u128 {
                return Err(BlockchainError::GasPriceTooHigh {
                    current_gwei: gas_price_gwei as u64,
                    max_gwei,
                });
            }
        }

        // Get current nonce from chain
        let nonce = self.client.transaction_count(self.wallet.address()).await?;

        tracing::info!(
            to = %to,
            gas_limit = self.gas_limit,
            gas_price_gwei = %gas_price_gwei,
            nonce = nonce,
            "Transaction details"
        );

        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(self.wallet.chain_id())
            .with_gas_limit(self.gas_limit);

        Ok(tx)
    }

    /// Build, sign, broadcast and wait for the transaction.
    pub async fn submit(&self, calldata: &Calldata) -> BlockchainResult<TransactionSummary> {
        let tx = self.build(calldata).await?;

        tracing::info!("Signing and sending transaction...");
        let signed = self.wallet.sign_transaction(tx).await?;
        let tx_hash = self.client.send_raw_transaction(&signed.raw).await?;
        if tx_hash != signed.hash {
            tracing::warn!(local = %signed.hash, remote = %tx_hash, "Node reported a different transaction hash");
        }
        tracing::info!(tx_hash = %tx_hash, "Transaction sent, waiting for confirmation");

        let receipt = self.wait_for_confirmation(tx_hash).await?;
        let summary = TransactionSummary {
            tx_hash,
            block_number: receipt.block_number.unwrap_or_default(),
            status: TxStatus::from(receipt.success),
            gas_used: receipt.gas_used,
        };

        tracing::info!(
            tx_hash = %summary.tx_hash,
            block_number = summary.block_number,
            status = ?summary.status,
            gas_used = summary.gas_used,
            "Transaction confirmed"
        );

        Ok(summary)
    }

    /// Wait for a transaction to be mined with the required depth.
    ///
    /// A reverted transaction is returned as soon as its receipt appears.
    /// RPC failures while polling are logged and the poll is retried; the
    /// transaction is already broadcast, so they never end the wait.
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<ReceiptSummary> {
        let required_confirmations = self.confirmation_blocks;
        let mut ticker = interval(self.poll_interval);

        loop {
            ticker.tick().await;

            let receipt = match self.client.transaction_receipt(tx_hash).await {
                Ok(Some(r)) => r,
                Ok(None) => {
                    tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                    continue;
                }
                Err(e) => {
                    tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed, retrying");
                    continue;
                }
            };

            let tx_block = match receipt.block_number {
                Some(block) => block,
                None => {
                    tracing::debug!(tx_hash = %tx_hash, "Receipt in pending block");
                    continue;
                }
            };

            if !receipt.success {
                return Ok(receipt);
            }

            // The inclusion block counts as the first confirmation
            let current_block = match self.client.block_number().await {
                Ok(block) => block,
                Err(e) => {
                    tracing::warn!(tx_hash = %tx_hash, error = %e, "Block number poll failed, retrying");
                    continue;
                }
            };
            let confirmations = current_block.saturating_sub(tx_block) as u32 + 1;

            if confirmations >= required_confirmations {
                return Ok(receipt);
            }

            tracing::debug!(
                tx_hash = %tx_hash,
                confirmations = confirmations,
                required = required_confirmations,
                "Waiting for confirmations"
            );
        }
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }
}
