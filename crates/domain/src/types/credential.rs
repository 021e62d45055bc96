//! Application credentials and their product affiliation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a credential as reported by the remote side
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CredentialStatus {
    #[default]
    Active,
    Revoked,
    Pending,
    Other(String),
}

crate::impl_remote_status_conversions!(CredentialStatus {
    Active => "active" | "approved",
    Revoked => "revoked",
    Pending => "pending",
});

/// Approval state of one product on a credential
///
/// Always supplied by the remote side; the library never assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLinkStatus {
    Approved,
    Pending,
    Revoked,
    Other(String),
}

crate::impl_remote_status_conversions!(ProductLinkStatus {
    Approved => "approved",
    Pending => "pending",
    Revoked => "revoked",
});

/// Association between a credential and one catalog product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLink {
    /// Catalog product name (not validated locally)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductLinkStatus>,
}

impl ProductLink {
    /// Link without remote status, as supplied in a desired state.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), status: None }
    }

    pub fn with_status(name: impl Into<String>, status: ProductLinkStatus) -> Self {
        Self { name: name.into(), status: Some(status) }
    }
}

/// An application's access grant (API key)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Credential {
    /// Vendor-issued consumer key, the credential's identity
    pub key: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub secret: String,
    #[serde(default)]
    pub issued_at: Option<DateTime<Utc>>,
    /// `None` means the credential never expires
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: CredentialStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Products in remote display order
    #[serde(default)]
    pub products: Vec<ProductLink>,
}

impl Credential {
    /// Desired-state credential for `key` with no products.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn with_product(mut self, link: ProductLink) -> Self {
        self.products.push(link);
        self
    }

    pub fn with_products<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.products.extend(names.into_iter().map(ProductLink::named));
        self
    }

    /// Product names in stored order, duplicates included.
    pub fn product_names(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|link| link.name.as_str())
    }

    pub fn has_product(&self, name: &str) -> bool {
        self.products.iter().any(|link| link.name == name)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }
}
