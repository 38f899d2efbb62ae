use serde::{Deserialize, Serialize};

use crate::domain::audience::Audience;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
/// Bounds a stuck job to roughly ten minutes at the default interval
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 600;
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 50;

/// Application configuration. Every field is optional so that partial
/// sources (file, environment, CLI flags) can be merged with precedence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the analysis API
    pub api_base_url: Option<String>,

    /// Base URL of the identity service, if different from the API
    pub auth_base_url: Option<String>,

    /// Bearer token for authenticated requests
    pub access_token: Option<String>,

    /// Upload size ceiling in megabytes
    pub max_upload_mb: Option<u64>,

    /// Delay between status polls in milliseconds
    pub poll_interval_ms: Option<u64>,

    /// Poll attempts before giving up on a job
    pub max_poll_attempts: Option<u32>,

    /// Default audience key for fit scoring
    pub audience: Option<String>,
}

impl AppConfig {
    /// Configuration with every field set to its built-in default
    pub fn defaults() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            auth_base_url: None,
            access_token: None,
            max_upload_mb: Some(DEFAULT_MAX_UPLOAD_MB),
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            max_poll_attempts: Some(DEFAULT_MAX_POLL_ATTEMPTS),
            audience: Some(Audience::default().key().to_string()),
        }
    }

    /// Configuration with no fields set
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge another configuration over this one. Fields set in `other`
    /// take precedence.
    pub fn merge(self, other: Self) -> Self {
        Self {
            api_base_url: other.api_base_url.or(self.api_base_url),
            auth_base_url: other.auth_base_url.or(self.auth_base_url),
            access_token: other.access_token.or(self.access_token),
            max_upload_mb: other.max_upload_mb.or(self.max_upload_mb),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            max_poll_attempts: other.max_poll_attempts.or(self.max_poll_attempts),
            audience: other.audience.or(self.audience),
        }
    }

    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn max_upload_mb_or_default(&self) -> u64 {
        self.max_upload_mb.unwrap_or(DEFAULT_MAX_UPLOAD_MB)
    }

    pub fn poll_interval_ms_or_default(&self) -> u64 {
        self.poll_interval_ms.unwrap_or(DEFAULT_POLL_INTERVAL_MS)
    }

    pub fn max_poll_attempts_or_default(&self) -> u32 {
        self.max_poll_attempts.unwrap_or(DEFAULT_MAX_POLL_ATTEMPTS)
    }

    /// Configured audience, falling back to the default for a missing or
    /// unrecognized key
    pub fn audience_or_default(&self) -> Audience {
        self.audience
            .as_deref()
            .and_then(|key| key.parse().ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.api_base_url.as_deref(), Some(DEFAULT_API_BASE_URL));
        assert_eq!(config.max_upload_mb, Some(50));
        assert_eq!(config.poll_interval_ms, Some(1000));
        assert_eq!(config.max_poll_attempts, Some(600));
        assert_eq!(config.audience.as_deref(), Some("general"));
        assert!(config.access_token.is_none());
    }

    #[test]
    fn empty_has_all_none() {
        assert_eq!(AppConfig::empty(), AppConfig::default());
        assert!(AppConfig::empty().api_base_url.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig::defaults();
        let override_config = AppConfig {
            api_base_url: Some("https://api.example.com".to_string()),
            poll_interval_ms: Some(250),
            ..AppConfig::empty()
        };

        let merged = base.merge(override_config);
        assert_eq!(
            merged.api_base_url.as_deref(),
            Some("https://api.example.com")
        );
        assert_eq!(merged.poll_interval_ms, Some(250));
        // Unset fields keep the base values
        assert_eq!(merged.max_upload_mb, Some(50));
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = AppConfig::empty();
        assert_eq!(config.api_base_url_or_default(), DEFAULT_API_BASE_URL);
        assert_eq!(config.max_upload_mb_or_default(), 50);
        assert_eq!(config.poll_interval_ms_or_default(), 1000);
        assert_eq!(config.max_poll_attempts_or_default(), 600);
        assert_eq!(config.audience_or_default(), Audience::General);
    }

    #[test]
    fn invalid_audience_falls_back_to_general() {
        let config = AppConfig {
            audience: Some("everybody".to_string()),
            ..AppConfig::empty()
        };
        assert_eq!(config.audience_or_default(), Audience::General);
    }
}
