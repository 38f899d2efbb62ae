//! Core domain types and state machines, free of I/O

pub mod analysis;
pub mod audience;
pub mod capture;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod job;

pub use analysis::{AnalysisViewModel, RawAnalysis};
pub use audience::{Audience, AudienceFit};
pub use capture::{CapturePayload, RecordingSession, UploadPolicy};
pub use config::AppConfig;
pub use dashboard::{DashboardPhase, PhaseMachine};
pub use job::{JobId, JobStatus, StatusReport};
