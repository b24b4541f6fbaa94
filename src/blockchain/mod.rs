//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (build, sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{BlockchainClient, ChainRpc};
pub use transaction::TxSubmitter;
pub use types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, ReceiptSummary,
    TransactionSummary, TxStatus,
};
pub use wallet::Wallet;
