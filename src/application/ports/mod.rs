//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod backend;
pub mod config;
pub mod entitlements;
pub mod recorder;

// Re-export common types
pub use backend::{AnalysisBackend, BackendError};
pub use config::ConfigStore;
pub use entitlements::{EntitlementsError, EntitlementsProvider};
pub use recorder::{ChunkedRecorder, RecordingError};
