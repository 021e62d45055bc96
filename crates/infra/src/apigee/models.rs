//! Wire shapes of the management API
//!
//! These mirror the vendor JSON one to one. Nothing outside the `apigee`
//! module sees them; [`super::translate`] converts to and from the neutral
//! domain types.

use serde::{Deserialize, Serialize};

/// `{name, value}` pair used for vendor attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Epoch-millisecond timestamp; the API sends strings but older payloads
/// carry bare numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EpochMillis {
    Text(String),
    Number(i64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeProductName {
    pub apiproduct: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeCredential {
    pub consumer_key: String,
    #[serde(default)]
    pub consumer_secret: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub api_products: Vec<ApigeeProductName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeProduct {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub approval_type: String,
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
}

/// `GET /apiproducts?expand=true` envelope; an empty catalog omits the key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeProductList {
    #[serde(default)]
    pub api_product: Vec<ApigeeProduct>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeDeveloper {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<EpochMillis>,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub apps: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApigeeApp {
    #[serde(default)]
    pub app_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<EpochMillis>,
    #[serde(default)]
    pub credentials: Vec<ApigeeCredential>,
    #[serde(default)]
    pub api_products: Vec<String>,
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
}

/// Body of `POST .../keys/{key}`; the list is always sent, even when empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProductsRequest<'a> {
    pub api_products: &'a [String],
}

/// `{"error": {...}}` envelope carried by rejected requests
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApigeeError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApigeeError {
    #[serde(default)]
    pub code: Option<ErrorCode>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

/// Error codes arrive as numbers from the API and as strings from some
/// proxies in front of it.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Number(u16),
    Text(String),
}
