use anyhow::Context;
use async_trait::async_trait;
use inci_analysis::{AnalysisBackend, AnalysisError};
use inci_protocol::{AnalyzeRequest, AnalyzeResponse};
use reqwest::Client;
use std::time::{Duration, Instant};

/// Analysis API over HTTP. One POST per attempt, bounded by the client timeout.
pub(crate) struct HttpBackend {
    client: Client,
    endpoint: String,
}

impl HttpBackend {
    pub(crate) fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, AnalysisError> {
        let started = Instant::now();
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(endpoint = %self.endpoint, error = %err, "analysis request failed");
                AnalysisError::transport(err.to_string())
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AnalysisError::transport(err.to_string()))?;
        tracing::debug!(
            status = %status,
            body_len = body.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis response received"
        );
        parse_response(&body)
    }
}

/// The body decides success or failure; the HTTP status does not.
pub(crate) fn parse_response(body: &str) -> Result<AnalyzeResponse, AnalysisError> {
    serde_json::from_str(body)
        .map_err(|err| AnalysisError::transport(format!("invalid response body: {err}")))
}
