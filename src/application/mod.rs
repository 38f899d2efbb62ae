//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod dashboard;
pub mod ports;
pub mod record;

// Re-export use cases
pub use dashboard::{Dashboard, DashboardCallbacks, DashboardError};
pub use record::{RecordAudioUseCase, RecordCallbacks, RecordError, RecordOutput};
