//! HTTP client for the document-analysis service.

use std::path::Path;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::debug;

use invox_core::models::config::ServiceConfig;
use invox_core::{AnalysisError, Document, DocumentAnalyzer};

/// Client for the analysis service's job API.
///
/// Submits the document bytes together with the staging location the service
/// reads from, then polls the job until it settles. Analysis of a scanned
/// invoice can take a while; the polling window is bounded by the configured
/// timeout.
pub struct AnalysisClient {
    http: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    poll_interval: Duration,
    poll_timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum JobState {
    Queued,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    state: JobState,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    document: Option<Document>,
}

impl AnalysisClient {
    /// Create a client from the service configuration.
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        if config.endpoint.is_empty() {
            anyhow::bail!(
                "service.endpoint is not set. Run 'invox config init' and fill in the \
                 analysis service settings."
            );
        }

        let http = reqwest::Client::builder().build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            poll_timeout: Duration::from_secs(config.poll_timeout_secs),
        })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Submit a document for analysis; returns the job id to poll.
    async fn submit(&self, file: &Path, upload_location: &str) -> Result<String, AnalysisError> {
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| AnalysisError::Upload(format!("{}: {}", file.display(), e)))?;

        let filename = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("document.pdf");

        let request = self
            .http
            .post(format!("{}/v1/analyses", self.endpoint))
            .query(&[("filename", filename), ("upload_location", upload_location)])
            .header(reqwest::header::CONTENT_TYPE, "application/pdf")
            .body(bytes);

        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| AnalysisError::Request(e.to_string()))?
            .error_for_status()
            .map_err(|e| AnalysisError::Upload(e.to_string()))?;

        let submitted: SubmitResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        debug!(job_id = %submitted.job_id, file = %file.display(), "analysis job submitted");
        Ok(submitted.job_id)
    }

    /// Poll a job until it succeeds, fails, or the timeout elapses.
    async fn wait(&self, job_id: &str) -> Result<Document, AnalysisError> {
        let deadline = Instant::now() + self.poll_timeout;

        loop {
            let request = self
                .http
                .get(format!("{}/v1/analyses/{}", self.endpoint, job_id));

            let status: JobStatus = self
                .authorized(request)
                .send()
                .await
                .map_err(|e| AnalysisError::Request(e.to_string()))?
                .error_for_status()
                .map_err(|e| AnalysisError::Request(e.to_string()))?
                .json()
                .await
                .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

            match status.state {
                JobState::Succeeded => {
                    return status.document.ok_or_else(|| {
                        AnalysisError::Malformed("succeeded job carried no document".to_string())
                    });
                }
                JobState::Failed => {
                    return Err(AnalysisError::JobFailed {
                        job_id: job_id.to_string(),
                        reason: status.error.unwrap_or_else(|| "unspecified".to_string()),
                    });
                }
                JobState::Queued | JobState::Running => {}
            }

            if Instant::now() >= deadline {
                return Err(AnalysisError::Timeout(job_id.to_string()));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

impl DocumentAnalyzer for AnalysisClient {
    async fn analyze(
        &self,
        file: &Path,
        upload_location: &str,
    ) -> Result<Document, AnalysisError> {
        let job_id = self.submit(file, upload_location).await?;
        self.wait(&job_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_running_job_status() {
        let status: JobStatus = serde_json::from_str(r#"{"state": "running"}"#).unwrap();

        assert_eq!(status.state, JobState::Running);
        assert!(status.document.is_none());
    }

    #[test]
    fn test_parse_succeeded_job_status_with_document() {
        let status: JobStatus = serde_json::from_str(
            r#"{
                "state": "succeeded",
                "document": {
                    "key_values": [{"key": "Issue date:", "value": "2019-10-31"}],
                    "tables": [{"rows": [["Product Name"], ["Widget"]]}]
                }
            }"#,
        )
        .unwrap();

        assert_eq!(status.state, JobState::Succeeded);
        let document = status.document.unwrap();
        assert_eq!(document.tables[0].num_rows(), 2);
    }

    #[test]
    fn test_parse_failed_job_status() {
        let status: JobStatus =
            serde_json::from_str(r#"{"state": "failed", "error": "malformed PDF"}"#).unwrap();

        assert_eq!(status.state, JobState::Failed);
        assert_eq!(status.error.as_deref(), Some("malformed PDF"));
    }

    #[test]
    fn test_client_requires_endpoint() {
        let result = AnalysisClient::new(&ServiceConfig::default());

        assert!(result.is_err());
    }
}
