//! Developer accounts

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A developer account that owns apps
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Developer {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_name: String,
    #[serde(default)]
    pub developer_id: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_modified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    /// Names of the apps owned by this developer
    #[serde(default)]
    pub apps: Vec<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}
