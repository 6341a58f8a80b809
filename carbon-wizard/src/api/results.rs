// Results endpoint client
//
// `POST /results` with the flat JSON submission. The transport is a trait so the wizard can be
// driven against a stub in tests and against `reqwest` in the real binary.

use async_trait::async_trait;
use log::{debug, info};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::WizardConfig;
use crate::models::requests::ResultsSubmission;
use crate::models::responses::ResultsResponse;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned HTTP {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(String),
}

#[async_trait]
pub trait ResultsTransport: Send + Sync {
    async fn post_results(
        &self,
        submission: &ResultsSubmission,
    ) -> Result<ResultsResponse, SubmitError>;
}

pub struct HttpResultsClient {
    client: reqwest::Client,
    url: Url,
}

impl HttpResultsClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, url))
    }

    pub fn with_client(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }

    pub fn from_config(config: &WizardConfig) -> anyhow::Result<Self> {
        let url = config.results_url()?;
        Ok(Self::new(url, config.request_timeout())?)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ResultsTransport for HttpResultsClient {
    async fn post_results(
        &self,
        submission: &ResultsSubmission,
    ) -> Result<ResultsResponse, SubmitError> {
        info!(
            "[PHASE: submit] [STEP: post] POST {} ({} fields)",
            self.url,
            submission.len()
        );

        // `.json()` sets `Content-Type: application/json`.
        let resp = self
            .client
            .post(self.url.clone())
            .json(submission)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = resp.status();
        debug!("[PHASE: submit] [STEP: response] HTTP {}", status);
        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16()));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;
        serde_json::from_slice::<ResultsResponse>(&bytes)
            .map_err(|e| SubmitError::Decode(e.to_string()))
    }
}
