//! Analysis job value objects

use std::fmt;

use serde::Deserialize;

/// Opaque job identifier assigned by the backend on submission.
/// Never reused; one analysis request per id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Wrap a backend-assigned identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Backend job status.
/// `Done` and `Failed` are terminal; polling stops on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Done,
    Failed,
}

impl JobStatus {
    /// Get the string representation (the backend's wire value)
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }

    /// Whether this status ends the poll loop
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One status poll as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusReport {
    pub status: JobStatus,
    /// Raw progress value; scale is ambiguous on the wire (see
    /// [`normalize_progress`]). `None` when the backend omits it.
    pub progress: Option<f64>,
}

/// Normalize a backend progress value to a 0-100 percentage.
///
/// The backend does not commit to a scale: some responses report a fraction
/// (`0.4`), others a percentage (`40`). Values `<= 1` are treated as a
/// fraction and multiplied by 100; values `> 1` are used as-is. The result
/// is floored and clamped to `[0, 100]`; NaN and negative input clamp to 0.
pub fn normalize_progress(progress: f64) -> u8 {
    if progress.is_nan() || progress <= 0.0 {
        return 0;
    }
    let percent = if progress <= 1.0 {
        progress * 100.0
    } else {
        progress
    };
    percent.floor().min(100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_round_trip() {
        let id = JobId::new("abc-123");
        assert_eq!(id.as_str(), "abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn status_terminal() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Processing.is_terminal());
        assert!(JobStatus::Done.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn status_deserializes_wire_values() {
        let status: JobStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(status, JobStatus::Processing);

        let status: JobStatus = serde_json::from_str("\"failed\"").unwrap();
        assert_eq!(status, JobStatus::Failed);
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert!(serde_json::from_str::<JobStatus>("\"exploded\"").is_err());
    }

    #[test]
    fn fraction_scales_to_percent() {
        assert_eq!(normalize_progress(0.4), 40);
        assert_eq!(normalize_progress(0.999), 99);
        assert_eq!(normalize_progress(1.0), 100);
    }

    #[test]
    fn percentage_passes_through_floored() {
        assert_eq!(normalize_progress(40.0), 40);
        assert_eq!(normalize_progress(99.7), 99);
        assert_eq!(normalize_progress(100.0), 100);
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(normalize_progress(-0.5), 0);
        assert_eq!(normalize_progress(-20.0), 0);
        assert_eq!(normalize_progress(250.0), 100);
    }

    #[test]
    fn non_finite_clamps() {
        assert_eq!(normalize_progress(f64::NAN), 0);
        assert_eq!(normalize_progress(f64::INFINITY), 100);
        assert_eq!(normalize_progress(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn zero_is_zero() {
        assert_eq!(normalize_progress(0.0), 0);
    }
}
