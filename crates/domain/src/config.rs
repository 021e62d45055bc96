//! Client configuration
//!
//! A [`ClientConfig`] is built once and handed to the gateway at
//! construction. Nothing mutates it afterwards, so concurrent operations on
//! one client always see the same organisation and credentials.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

/// Connection settings for one control-plane client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Management API root, without a trailing slash
    pub base_url: String,
    /// Organisation to address; resolved from the token provider when unset
    pub organization: Option<String>,
    /// Fixed bearer token; when unset a token provider is used
    #[serde(skip_serializing)]
    pub token: Option<String>,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration for `organization` with every other field defaulted.
    pub fn for_organization(organization: impl Into<String>) -> Self {
        Self { organization: Some(organization.into()), ..Self::default() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_fields() {
        let config: ClientConfig = serde_json::from_str(r#"{"organization": "acme"}"#).unwrap();
        assert_eq!(config.organization.as_deref(), Some("acme"));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn token_is_never_serialized() {
        let config = ClientConfig::for_organization("acme").with_token("secret-token");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ClientConfig::default().with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn parses_from_toml() {
        let config: ClientConfig = toml::from_str(
            r#"
organization = "acme"
timeout_secs = 5
"#,
        )
        .unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert!(config.token.is_none());
    }
}
