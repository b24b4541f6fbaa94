//! HTTP upload to the edit store.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::config::IpfsConfig;
use crate::publish::types::{content_id_for, ContentId, EditStore, PublishError, PublishResult};
use crate::schema::Edit;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    cid: Option<String>,
}

/// Publishes edits through `POST {api_url}/ipfs/upload-edit`.
#[derive(Debug, Clone)]
pub struct IpfsPublisher {
    client: Client,
    upload_url: String,
}

impl IpfsPublisher {
    pub fn new(config: &IpfsConfig) -> PublishResult<Self> {
        let base = Url::parse(&config.api_url).map_err(|e| PublishError::InvalidUrl {
            url: config.api_url.clone(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            upload_url: format!("{}/ipfs/upload-edit", base.as_str().trim_end_matches('/')),
        })
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }
}

impl EditStore for IpfsPublisher {
    async fn publish(&self, edit: &Edit) -> PublishResult<ContentId> {
        let bytes = edit.to_bytes()?;
        let local = content_id_for(&bytes);

        tracing::info!(
            name = edit.name(),
            ops = edit.ops().len(),
            bytes = bytes.len(),
            local_cid = %local,
            "Publishing edit"
        );

        let resp = self.client
            .post(&self.upload_url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), error = %body, "Edit store error");
            return Err(PublishError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let cid = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.cid)
            .filter(|cid| !cid.trim().is_empty());

        match cid {
            Some(cid) => {
                let cid = ContentId::new(cid);
                tracing::info!(cid = %cid, "Edit published");
                Ok(cid)
            }
            None => Err(PublishError::MissingCid { body }),
        }
    }
}
