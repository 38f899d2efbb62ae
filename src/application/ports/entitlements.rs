//! Entitlements port interface

use async_trait::async_trait;
use thiserror::Error;

/// Entitlements errors
#[derive(Debug, Clone, Error)]
pub enum EntitlementsError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Identity request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse identity response: {0}")]
    ParseError(String),
}

/// Port for resolving the current user's subscription tier
#[async_trait]
pub trait EntitlementsProvider: Send + Sync {
    /// Whether the current user holds a pro entitlement
    async fn is_pro(&self) -> Result<bool, EntitlementsError>;
}
