//! HTTP client for the space calldata endpoint.

use reqwest::header::ACCEPT;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::calldata::types::{
    Calldata, CalldataError, CalldataRequest, CalldataResult, Network, RawCalldata,
};
use crate::config::ApiConfig;
use crate::publish::ContentId;

/// Client for `POST /space/{space_id}/edit/calldata`.
#[derive(Debug, Clone)]
pub struct CalldataClient {
    client: Client,
    base_url: Url,
}

impl CalldataClient {
    /// Create a client for the API at `config.base_url`.
    pub fn new(config: &ApiConfig) -> CalldataResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| CalldataError::InvalidUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Endpoint for a given space.
    pub fn endpoint(&self, space_id: &str) -> String {
        format!(
            "{}/space/{}/edit/calldata",
            self.base_url.as_str().trim_end_matches('/'),
            space_id
        )
    }

    /// Ask the API for the transaction that applies `cid` to `space_id`.
    pub async fn fetch(
        &self,
        space_id: &str,
        cid: &ContentId,
        network: Network,
    ) -> CalldataResult<Calldata> {
        let url = self.endpoint(space_id);
        let request = CalldataRequest {
            cid: cid.as_str(),
            network,
        };

        tracing::info!(space_id = space_id, cid = %cid, network = %network, "Requesting calldata");

        let resp = self.client
            .post(&url)
            .header(ACCEPT, "application/json")
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        tracing::debug!(status = status.as_u16(), body = %body, "Space API response");

        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                reason = status.canonical_reason().unwrap_or(""),
                error = %body,
                "Space API error"
            );
            return Err(CalldataError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                body,
            });
        }

        let raw: RawCalldata = serde_json::from_str(&body)
            .map_err(|_| CalldataError::InvalidJson { body: body.clone() })?;

        match raw.into_calldata() {
            Some(calldata) => {
                tracing::info!(to = %calldata.to, data = %calldata.data, "Received valid calldata");
                Ok(calldata)
            }
            None => Err(CalldataError::MissingFields { body }),
        }
    }
}
