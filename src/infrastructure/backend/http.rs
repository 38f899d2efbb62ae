//! HTTP analysis backend adapter

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{AnalysisBackend, BackendError};
use crate::domain::audience::{Audience, AudienceFit};
use crate::domain::capture::CapturePayload;
use crate::domain::job::{JobId, JobStatus, StatusReport};
use crate::domain::RawAnalysis;

// Response types for the analysis API

#[derive(Debug, Deserialize)]
struct UploadResponse {
    job_id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: JobStatus,
    #[serde(default)]
    progress: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default, alias = "detail")]
    error: Option<String>,
}

/// Analysis API client over HTTP
pub struct HttpAnalysisBackend {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpAnalysisBackend {
    /// Create a new backend client for the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a backend client with a preconfigured HTTP client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            access_token: None,
            client,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map a non-success response to a backend error, preferring the
    /// API's own error message when the body carries one
    async fn error_for(response: reqwest::Response) -> BackendError {
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return BackendError::JobNotFound;
        }
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or(body);
        BackendError::ApiError(format!("HTTP {status}: {message}"))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, BackendError> {
        let response = self
            .request(self.client.get(self.url(path)).query(query))
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl AnalysisBackend for HttpAnalysisBackend {
    async fn submit(&self, payload: &CapturePayload) -> Result<JobId, BackendError> {
        let part = multipart::Part::bytes(payload.data().to_vec())
            .file_name(payload.filename().to_string())
            .mime_str(payload.mime().as_str())
            .map_err(|e| BackendError::SubmissionFailed(e.to_string()))?;
        let form = multipart::Form::new().part("file", part);

        let response = self
            .request(self.client.post(self.url("upload")).multipart(form))
            .send()
            .await
            .map_err(|e| BackendError::SubmissionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| BackendError::ParseError(e.to_string()))?;

        Ok(JobId::new(upload.job_id))
    }

    async fn status(&self, job: &JobId) -> Result<StatusReport, BackendError> {
        let response: StatusResponse = self
            .get_json(&format!("status/{}", job.as_str()), &[])
            .await?;
        Ok(StatusReport {
            status: response.status,
            progress: response.progress,
        })
    }

    async fn result(&self, job: &JobId) -> Result<RawAnalysis, BackendError> {
        self.get_json(&format!("result/{}", job.as_str()), &[])
            .await
    }

    async fn audience_fit(
        &self,
        job: &JobId,
        audience: Audience,
    ) -> Result<AudienceFit, BackendError> {
        self.get_json(
            &format!("result/{}", job.as_str()),
            &[("audience", audience.key())],
        )
        .await
    }

    async fn download_report(
        &self,
        job: &JobId,
        audience: Audience,
    ) -> Result<Vec<u8>, BackendError> {
        let response = self
            .request(
                self.client
                    .get(self.url(&format!("download-report/{}", job.as_str())))
                    .query(&[("audience", audience.key())]),
            )
            .send()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::RequestFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let backend = HttpAnalysisBackend::new("http://localhost:8000/api///");
        assert_eq!(backend.url("status/j1"), "http://localhost:8000/api/status/j1");
    }

    #[test]
    fn status_response_allows_missing_progress() {
        let response: StatusResponse = serde_json::from_str(r#"{"status": "queued"}"#).unwrap();
        assert_eq!(response.status, JobStatus::Queued);
        assert!(response.progress.is_none());
    }

    #[test]
    fn error_response_reads_error_or_detail() {
        let e: ErrorResponse = serde_json::from_str(r#"{"error": "boom"}"#).unwrap();
        assert_eq!(e.error.as_deref(), Some("boom"));

        let d: ErrorResponse = serde_json::from_str(r#"{"detail": "bad file"}"#).unwrap();
        assert_eq!(d.error.as_deref(), Some("bad file"));
    }
}
