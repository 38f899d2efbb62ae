//! Capture payload value object

use std::fmt;
use std::path::Path;

use crate::domain::error::PayloadTooLarge;

/// Supported audio MIME types for upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioMimeType {
    Wav,
    Mp3,
    M4a,
    Flac,
    Ogg,
    Webm,
    /// Unrecognized extension; the backend sniffs the container anyway
    #[default]
    Unknown,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::M4a => "audio/mp4",
            Self::Flac => "audio/flac",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Infer the MIME type from a file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "wav" => Self::Wav,
            "mp3" => Self::Mp3,
            "m4a" | "mp4" => Self::M4a,
            "flac" => Self::Flac,
            "ogg" => Self::Ogg,
            "webm" => Self::Webm,
            _ => Self::Unknown,
        }
    }

    /// Infer the MIME type from a file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or_default()
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audio blob ready for submission, with the name and type the
/// multipart upload carries. Produced either from a user-selected file or
/// by a finished recording session, and handed off exactly once.
#[derive(Debug, Clone)]
pub struct CapturePayload {
    data: Vec<u8>,
    filename: String,
    mime: AudioMimeType,
}

impl CapturePayload {
    /// Create a payload from raw bytes
    pub fn new(data: Vec<u8>, filename: impl Into<String>, mime: AudioMimeType) -> Self {
        Self {
            data,
            filename: filename.into(),
            mime,
        }
    }

    /// Get the raw audio bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio bytes
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the upload filename
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the MIME type
    pub fn mime(&self) -> AudioMimeType {
        self.mime
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload carries no audio at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

/// Size ceiling applied to every payload before submission.
///
/// The ceiling is policy, not protocol: the backend would accept more, but
/// anything over it is rejected locally before a single byte goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadPolicy {
    max_bytes: u64,
}

impl UploadPolicy {
    /// Default ceiling: 50 MiB
    pub const DEFAULT_MAX_BYTES: u64 = 50 * 1024 * 1024;

    /// Create a policy with an explicit ceiling in bytes
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Create a policy with a ceiling in whole mebibytes
    pub fn from_max_mb(max_mb: u64) -> Self {
        Self {
            max_bytes: max_mb * 1024 * 1024,
        }
    }

    /// The ceiling in bytes
    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// The ceiling in whole mebibytes (for error messages)
    pub fn max_mb(&self) -> u64 {
        self.max_bytes / (1024 * 1024)
    }

    /// Check a payload against the ceiling
    pub fn check(&self, payload: &CapturePayload) -> Result<(), PayloadTooLarge> {
        if payload.size_bytes() as u64 > self.max_bytes {
            return Err(PayloadTooLarge {
                size_bytes: payload.size_bytes() as u64,
                max_mb: self.max_mb(),
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_from_extension() {
        assert_eq!(AudioMimeType::from_extension("wav"), AudioMimeType::Wav);
        assert_eq!(AudioMimeType::from_extension("MP3"), AudioMimeType::Mp3);
        assert_eq!(AudioMimeType::from_extension("m4a"), AudioMimeType::M4a);
        assert_eq!(AudioMimeType::from_extension("xyz"), AudioMimeType::Unknown);
    }

    #[test]
    fn mime_from_path() {
        assert_eq!(
            AudioMimeType::from_path(Path::new("talk/pitch.flac")),
            AudioMimeType::Flac
        );
        assert_eq!(
            AudioMimeType::from_path(Path::new("no_extension")),
            AudioMimeType::Unknown
        );
    }

    #[test]
    fn payload_size_and_emptiness() {
        let payload = CapturePayload::new(vec![0u8; 2048], "a.wav", AudioMimeType::Wav);
        assert_eq!(payload.size_bytes(), 2048);
        assert!(!payload.is_empty());
        assert_eq!(payload.human_readable_size(), "2.0 KB");

        let empty = CapturePayload::new(vec![], "a.wav", AudioMimeType::Wav);
        assert!(empty.is_empty());
    }

    #[test]
    fn policy_accepts_at_ceiling() {
        let policy = UploadPolicy::new(1024);
        let payload = CapturePayload::new(vec![0u8; 1024], "a.wav", AudioMimeType::Wav);
        assert!(policy.check(&payload).is_ok());
    }

    #[test]
    fn policy_rejects_over_ceiling() {
        let policy = UploadPolicy::new(1024);
        let payload = CapturePayload::new(vec![0u8; 1025], "a.wav", AudioMimeType::Wav);
        let err = policy.check(&payload).unwrap_err();
        assert_eq!(err.size_bytes, 1025);
    }

    #[test]
    fn default_policy_is_50_mib() {
        let policy = UploadPolicy::default();
        assert_eq!(policy.max_mb(), 50);
    }

    #[test]
    fn oversize_error_message_names_the_limit() {
        let policy = UploadPolicy::from_max_mb(50);
        let payload =
            CapturePayload::new(vec![0u8; 51 * 1024 * 1024], "big.wav", AudioMimeType::Wav);
        let err = policy.check(&payload).unwrap_err();
        assert_eq!(err.to_string(), "File size too large (max 50MB)");
    }
}
