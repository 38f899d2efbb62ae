//! HTTP identity provider adapter
//!
//! Resolves the pro entitlement from the identity service. The session's
//! own metadata flag is the baseline; a "pro" role on the stored profile
//! overrides it, so a granted role wins even when the session token was
//! issued before the grant.

use async_trait::async_trait;
use serde::Deserialize;

use crate::application::ports::{EntitlementsError, EntitlementsProvider};

// Response types for the identity service

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(default)]
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    is_pro: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(default)]
    role: Option<String>,
}

/// Identity service client over HTTP
pub struct HttpIdentityProvider {
    base_url: String,
    access_token: Option<String>,
    client: reqwest::Client,
}

impl HttpIdentityProvider {
    /// Create a new identity client for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create an identity client with a preconfigured HTTP client
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            access_token: None,
            client,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> Result<T, EntitlementsError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| EntitlementsError::RequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(EntitlementsError::NotAuthenticated);
        }
        if !response.status().is_success() {
            return Err(EntitlementsError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EntitlementsError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl EntitlementsProvider for HttpIdentityProvider {
    async fn is_pro(&self) -> Result<bool, EntitlementsError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(EntitlementsError::NotAuthenticated)?;

        let session: SessionResponse = self.get_json("auth/user", token).await?;
        let metadata_pro = session
            .user_metadata
            .and_then(|m| m.is_pro)
            .unwrap_or(false);

        // The profile lookup can fail independently of the session; fall
        // back to the session flag rather than erroring out
        match self.get_json::<ProfileResponse>("profile", token).await {
            Ok(profile) => Ok(profile.role.as_deref() == Some("pro") || metadata_pro),
            Err(_) => Ok(metadata_pro),
        }
    }
}
