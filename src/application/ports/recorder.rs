//! Recording port interface

use async_trait::async_trait;
use thiserror::Error;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Microphone access denied")]
    PermissionDenied,

    #[error("No audio device available")]
    NoAudioDevice,

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Recording produced no audio")]
    EmptyRecording,

    #[error("Recording was cancelled")]
    Cancelled,
}

/// Port for chunked audio capture.
///
/// The recorder accumulates fixed-interval chunks internally; the caller
/// drains them into a recording session at its own pace.
#[async_trait]
pub trait ChunkedRecorder: Send + Sync {
    /// Start capturing from the default input device.
    ///
    /// # Returns
    /// The sample rate of the emitted chunks
    async fn start(&self) -> Result<u32, RecordingError>;

    /// Take the chunks emitted since the last drain, oldest first.
    fn drain_chunks(&self) -> Vec<Vec<i16>>;

    /// Stop capturing. Samples still buffered are flushed as a final
    /// chunk and returned by the next drain.
    async fn stop(&self) -> Result<(), RecordingError>;

    /// Check if currently capturing
    fn is_recording(&self) -> bool;
}
