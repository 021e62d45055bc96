use std::fmt;

use apigate_domain::{ApiGateError, Result};
use async_trait::async_trait;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a valid access token
    ///
    /// Implementations refresh the token themselves when needed. Failures
    /// are reported as [`ApiGateError::Auth`].
    async fn access_token(&self) -> Result<String>;

    /// Organisation (project) the token belongs to, when the provider knows.
    async fn project_id(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Provider returning one fixed token
#[derive(Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// # Errors
    ///
    /// Returns `ApiGateError::Config` for an empty token
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ApiGateError::Config("access token must not be empty".into()));
        }
        Ok(Self { token })
    }
}

impl fmt::Debug for StaticTokenProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticTokenProvider").field("token", &"<redacted>").finish()
    }
}

#[async_trait]
impl AccessTokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
