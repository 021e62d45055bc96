//! Tokens from the compute metadata server
//!
//! Workloads running on the cloud provider get service-account tokens from
//! a link-local metadata endpoint. Tokens are cached in memory and fetched
//! again shortly before they expire.

use std::time::Duration;

use apigate_domain::{ApiGateError, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use super::provider::AccessTokenProvider;
use crate::http::HttpClient;

/// Metadata server root reachable from inside the cloud environment
pub const DEFAULT_METADATA_URL: &str = "http://metadata.google.internal";

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";
const PROJECT_PATH: &str = "/computeMetadata/v1/project/project-id";
const METADATA_FLAVOR: (&str, &str) = ("Metadata-Flavor", "Google");

/// Refresh this many seconds before the reported expiry
const REFRESH_THRESHOLD_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + chrono::Duration::seconds(REFRESH_THRESHOLD_SECS) < self.expires_at
    }
}

/// Absolute expiry for a token issued at `now` with a lifetime of
/// `expires_in` seconds.
fn expiry_from(now: DateTime<Utc>, expires_in: i64) -> Result<DateTime<Utc>> {
    if expires_in < 0 {
        return Err(ApiGateError::Auth(format!("invalid expires_in: {expires_in}")));
    }
    TimeDelta::try_seconds(expires_in)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or_else(|| ApiGateError::Auth(format!("invalid expires_in: {expires_in}")))
}

/// Token provider backed by the compute metadata server
pub struct MetadataTokenProvider {
    http: HttpClient,
    base_url: String,
    token: RwLock<Option<CachedToken>>,
    project: RwLock<Option<String>>,
}

impl MetadataTokenProvider {
    /// Provider talking to [`DEFAULT_METADATA_URL`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_METADATA_URL)
    }

    /// Provider talking to a custom metadata root (used by tests and
    /// emulators).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder().timeout(Duration::from_secs(5)).no_proxy(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: RwLock::new(None),
            project: RwLock::new(None),
        })
    }

    /// Drop the cached token so the next call fetches a new one.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    async fn fetch_token(&self) -> Result<CachedToken> {
        let body = self.get(TOKEN_PATH).await?;
        let response: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| ApiGateError::Auth(format!("malformed metadata token response: {e}")))?;

        if response.access_token.is_empty() {
            return Err(ApiGateError::Auth("metadata server returned an empty token".into()));
        }
        if let Some(kind) = response.token_type.as_deref() {
            if !kind.eq_ignore_ascii_case("bearer") {
                return Err(ApiGateError::Auth(format!("unsupported token type: {kind}")));
            }
        }

        Ok(CachedToken {
            access_token: response.access_token,
            expires_at: expiry_from(Utc::now(), response.expires_in)?,
        })
    }

    async fn get(&self, path: &str) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .http
            .request(Method::GET, &url)
            .header(METADATA_FLAVOR.0, METADATA_FLAVOR.1);

        let response = self.http.send(request).await.map_err(|e| {
            ApiGateError::Auth(format!("metadata server unreachable: {e}"))
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiGateError::Auth(format!("metadata server returned status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| ApiGateError::Auth(format!("failed to read metadata response: {e}")))
    }
}

#[async_trait]
impl AccessTokenProvider for MetadataTokenProvider {
    #[instrument(skip(self))]
    async fn access_token(&self) -> Result<String> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        let mut slot = self.token.write().await;
        // Another task may have refreshed while we waited for the lock.
        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        debug!("Fetching access token from metadata server");
        let fresh = self.fetch_token().await?;
        info!(expires_at = %fresh.expires_at, "Access token refreshed");
        let token = fresh.access_token.clone();
        *slot = Some(fresh);
        Ok(token)
    }

    #[instrument(skip(self))]
    async fn project_id(&self) -> Result<Option<String>> {
        if let Some(project) = self.project.read().await.as_ref() {
            return Ok(Some(project.clone()));
        }

        let project = self.get(PROJECT_PATH).await?.trim().to_string();
        if project.is_empty() {
            return Ok(None);
        }

        debug!(project = %project, "Resolved project from metadata server");
        *self.project.write().await = Some(project.clone());
        Ok(Some(project))
    }
}
