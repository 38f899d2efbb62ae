//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the analysis API, the identity service, the audio
//! stack, and the filesystem.

pub mod backend;
pub mod config;
pub mod identity;
pub mod recording;

// Re-export adapters
pub use backend::HttpAnalysisBackend;
pub use config::XdgConfigStore;
pub use identity::HttpIdentityProvider;
pub use recording::CpalChunkedRecorder;
