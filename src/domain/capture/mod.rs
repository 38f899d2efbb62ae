//! Audio capture domain: payloads, size policy, and recording sessions

pub mod payload;
pub mod session;

pub use payload::{AudioMimeType, CapturePayload, UploadPolicy};
pub use session::{FinishError, InvalidSessionTransition, RecordingSession, SessionState};
