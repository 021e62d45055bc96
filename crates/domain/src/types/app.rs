//! Developer apps

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credential::Credential;

/// An application registered by a developer
///
/// Apps are created with a first credential; further credentials are
/// managed on the app by the remote side.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct App {
    pub app_id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub callback_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub api_products: Vec<String>,
    #[serde(default)]
    pub credentials: Vec<Credential>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl App {
    pub fn credential(&self, key: &str) -> Option<&Credential> {
        self.credentials.iter().find(|credential| credential.key == key)
    }
}
