//! Analysis backend port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audience::{Audience, AudienceFit};
use crate::domain::capture::CapturePayload;
use crate::domain::job::{JobId, StatusReport};
use crate::domain::RawAnalysis;

/// Backend errors
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("Upload failed: {0}")]
    SubmissionFailed(String),

    #[error("Job not found")]
    JobNotFound,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Port for the asynchronous analysis service
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit an audio payload for analysis.
    ///
    /// # Returns
    /// The identifier of the queued job
    async fn submit(&self, payload: &CapturePayload) -> Result<JobId, BackendError>;

    /// Fetch the current status of a job.
    async fn status(&self, job: &JobId) -> Result<StatusReport, BackendError>;

    /// Fetch the analysis result of a finished job.
    async fn result(&self, job: &JobId) -> Result<RawAnalysis, BackendError>;

    /// Re-score a finished job against a target audience.
    async fn audience_fit(
        &self,
        job: &JobId,
        audience: Audience,
    ) -> Result<AudienceFit, BackendError>;

    /// Download the rendered report for a finished job.
    ///
    /// # Returns
    /// The report file bytes
    async fn download_report(
        &self,
        job: &JobId,
        audience: Audience,
    ) -> Result<Vec<u8>, BackendError>;
}
