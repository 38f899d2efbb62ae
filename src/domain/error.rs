//! Domain error types

use thiserror::Error;

/// Error when a payload exceeds the upload size ceiling.
/// The message matches what the dashboard shows at the default 50 MB cap.
#[derive(Debug, Clone, Error)]
#[error("File size too large (max {max_mb}MB)")]
pub struct PayloadTooLarge {
    pub size_bytes: u64,
    pub max_mb: u64,
}

/// Error when an invalid audience key is provided
#[derive(Debug, Clone, Error)]
#[error("Invalid audience: \"{input}\". Valid audiences are: general, students, professionals, interviews, marketing")]
pub struct InvalidAudienceError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
