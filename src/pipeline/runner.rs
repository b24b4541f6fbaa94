//! Stage orchestration.

use std::future::Future;
use std::time::Instant;

use crate::blockchain::{ChainRpc, TxStatus, TxSubmitter};
use crate::calldata::CalldataClient;
use crate::config::SpaceConfig;
use crate::observability::metrics::record_stage;
use crate::pipeline::types::{
    PipelineError, RunSummary, STAGE_CALLDATA, STAGE_PUBLISH, STAGE_SCHEMA, STAGE_SUBMIT,
};
use crate::publish::{ContentId, EditStore};
use crate::schema::{Edit, EditBuilder, SchemaResult};

const GEO_BROWSER_URL: &str = "https://geobrowser.io/space";

/// One configured run of build → publish → calldata → submit.
pub struct Pipeline<S, C> {
    space: SpaceConfig,
    store: S,
    calldata: CalldataClient,
    submitter: Option<TxSubmitter<C>>,
}

impl<S: EditStore, C: ChainRpc> Pipeline<S, C> {
    /// `submitter` is `None` when no signing key is configured; the run then
    /// stops after fetching calldata.
    pub fn new(
        space: SpaceConfig,
        store: S,
        calldata: CalldataClient,
        submitter: Option<TxSubmitter<C>>,
    ) -> Self {
        Self {
            space,
            store,
            calldata,
            submitter,
        }
    }

    /// Build the edit with `build`, then publish and submit it.
    pub async fn run<F>(&self, build: F) -> Result<RunSummary, PipelineError>
    where
        F: FnOnce(EditBuilder) -> SchemaResult<Edit>,
    {
        let started = Instant::now();
        let edit = build(EditBuilder::new());
        record_stage(STAGE_SCHEMA, edit.is_ok(), started);
        let edit = edit?;

        tracing::info!(name = edit.name(), ops = edit.ops().len(), "Edit built");
        self.run_edit(edit).await
    }

    /// Publish an already built edit and carry it through the remaining stages.
    pub async fn run_edit(&self, edit: Edit) -> Result<RunSummary, PipelineError> {
        let cid = timed(STAGE_PUBLISH, self.store.publish(&edit)).await?;

        let calldata = timed(
            STAGE_CALLDATA,
            self.calldata.fetch(&self.space.space_id, &cid, self.space.network),
        )
        .await?;

        let Some(submitter) = &self.submitter else {
            tracing::info!("No signer for this run, transaction not submitted");
            tracing::info!(
                to = %calldata.to,
                data = %calldata.data,
                "To submit the transaction manually, use this calldata"
            );
            return Ok(RunSummary {
                cid,
                to: calldata.to,
                data: calldata.data,
                transaction: None,
            });
        };

        tracing::info!(address = %submitter.address(), "Submitting transaction to blockchain...");
        let transaction = timed(STAGE_SUBMIT, submitter.submit(&calldata)).await?;

        if transaction.status == TxStatus::Success {
            tracing::info!(
                url = %format!("{}/{}", GEO_BROWSER_URL, self.space.space_id),
                "View your entity in the geobrowser"
            );
        } else {
            tracing::warn!(tx_hash = %transaction.tx_hash, "Transaction reverted");
        }

        Ok(RunSummary {
            cid,
            to: calldata.to,
            data: calldata.data,
            transaction: Some(transaction),
        })
    }
}

/// Build an edit and publish it to `store` without contacting the API or chain.
pub async fn run_offline<S, F>(store: &S, build: F) -> Result<(ContentId, Edit), PipelineError>
where
    S: EditStore,
    F: FnOnce(EditBuilder) -> SchemaResult<Edit>,
{
    let edit = build(EditBuilder::new())?;
    let cid = timed(STAGE_PUBLISH, store.publish(&edit)).await?;
    Ok((cid, edit))
}

async fn timed<T, E, Fut>(stage: &'static str, fut: Fut) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let result = fut.await;
    record_stage(stage, result.is_ok(), started);
    result
}
