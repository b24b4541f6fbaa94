//! Run outcome and error taxonomy.

use serde::Serialize;
use thiserror::Error;

use crate::blockchain::{BlockchainError, TransactionSummary};
use crate::calldata::CalldataError;
use crate::publish::{ContentId, PublishError};
use crate::schema::SchemaError;

pub const STAGE_SCHEMA: &str = "schema";
pub const STAGE_PUBLISH: &str = "publish";
pub const STAGE_CALLDATA: &str = "calldata";
pub const STAGE_SUBMIT: &str = "submit";

/// Summary of a completed run.
///
/// Without a signing key only `cid`, `to` and `data` are present; after a
/// submission the transaction fields are flattened alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub cid: ContentId,
    pub to: String,
    pub data: String,
    #[serde(flatten)]
    pub transaction: Option<TransactionSummary>,
}

/// The first failure of a run. Nothing is retried; later stages never ran.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Publish failed: {0}")]
    Publish(#[from] PublishError),

    #[error("Calldata request failed: {0}")]
    Calldata(#[from] CalldataError),

    #[error("Transaction submission failed: {0}")]
    Submission(#[from] BlockchainError),
}

impl PipelineError {
    /// Name of the stage that failed.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Schema(_) => STAGE_SCHEMA,
            PipelineError::Publish(_) => STAGE_PUBLISH,
            PipelineError::Calldata(_) => STAGE_CALLDATA,
            PipelineError::Submission(_) => STAGE_SUBMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::TxStatus;
    use alloy::primitives::TxHash;

    #[test]
    fn test_manual_summary_has_only_calldata() {
        let summary = RunSummary {
            cid: ContentId::new("ipfs://bafkreiabc"),
            to: "0xABC".into(),
            data: "0x01".into(),
            transaction: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "cid": "ipfs://bafkreiabc", "to": "0xABC", "data": "0x01" })
        );
    }

    #[test]
    fn test_submitted_summary_flattens_transaction() {
        let summary = RunSummary {
            cid: ContentId::new("ipfs://bafkreiabc"),
            to: "0xABC".into(),
            data: "0x01".into(),
            transaction: Some(TransactionSummary {
                tx_hash: TxHash::ZERO,
                block_number: 42,
                status: TxStatus::Success,
                gas_used: 21_000,
            }),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "Success");
        assert_eq!(json["blockNumber"], 42);
        assert_eq!(json["cid"], "ipfs://bafkreiabc");
    }

    #[test]
    fn test_stage_names() {
        let err: PipelineError = SchemaError::EmptyName { kind: "type" }.into();
        assert_eq!(err.stage(), "schema");

        let err: PipelineError = CalldataError::MissingFields { body: "{}".into() }.into();
        assert_eq!(err.stage(), "calldata");
        assert!(err.to_string().contains("missing required fields"));

        let err: PipelineError = BlockchainError::Rpc("down".into()).into();
        assert_eq!(err.stage(), "submit");
    }
}
