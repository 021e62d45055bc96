//! Vendor to domain translation
//!
//! Pure functions only. Product attributes named in [`LIFTED_ATTRIBUTES`]
//! are copied into first-class fields; every attribute, lifted or not, is
//! also kept verbatim in the neutral attribute map.

use std::collections::BTreeMap;

use apigate_domain::constants::{ATTR_ACCESS, ATTR_IMAGE, ATTR_SPEC, ATTR_TYPE, NEVER_EXPIRES};
use apigate_domain::{
    App, Credential, CredentialStatus, Developer, Product, ProductLink, ProductLinkStatus,
    RemoteError,
};
use chrono::{DateTime, Utc};

use super::models::{
    ApigeeApp, ApigeeCredential, ApigeeDeveloper, ApigeeError, ApigeeProduct, EpochMillis,
    ErrorCode, KeyValue,
};

/// Vendor attribute names that map onto [`Product`] fields
pub const LIFTED_ATTRIBUTES: [&str; 4] = [ATTR_IMAGE, ATTR_SPEC, ATTR_ACCESS, ATTR_TYPE];

/* -------------------------------------------------------------------------- */
/* Timestamps */
/* -------------------------------------------------------------------------- */

/// Decode an epoch-millisecond timestamp. The never-expires marker and
/// anything unparsable decode to `None`.
pub fn parse_epoch_millis(raw: &EpochMillis) -> Option<DateTime<Utc>> {
    let millis = match raw {
        EpochMillis::Text(text) => {
            let text = text.trim();
            if text == NEVER_EXPIRES {
                return None;
            }
            text.parse::<i64>().ok()?
        }
        EpochMillis::Number(value) => *value,
    };

    if millis < 0 {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn timestamp(raw: Option<&EpochMillis>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_epoch_millis)
}

/* -------------------------------------------------------------------------- */
/* Credentials */
/* -------------------------------------------------------------------------- */

pub fn credential_from_vendor(vendor: ApigeeCredential) -> Credential {
    Credential {
        key: vendor.consumer_key,
        secret: vendor.consumer_secret,
        issued_at: timestamp(vendor.issued_at.as_ref()),
        expires_at: timestamp(vendor.expires_at.as_ref()),
        status: vendor
            .status
            .map(|raw| raw.parse::<CredentialStatus>().unwrap_or_default())
            .unwrap_or_else(|| CredentialStatus::Other(String::new())),
        scopes: vendor.scopes,
        products: vendor
            .api_products
            .into_iter()
            .map(|link| ProductLink {
                name: link.apiproduct,
                status: link.status.and_then(|raw| raw.parse::<ProductLinkStatus>().ok()),
            })
            .collect(),
    }
}

/* -------------------------------------------------------------------------- */
/* Products */
/* -------------------------------------------------------------------------- */

pub fn product_from_vendor(vendor: ApigeeProduct) -> Product {
    let attributes = attribute_map(vendor.attributes);
    let lifted = |name: &str| attributes.get(name).cloned();

    Product {
        kind: lifted(ATTR_TYPE),
        image_url: lifted(ATTR_IMAGE),
        spec_url: lifted(ATTR_SPEC),
        access: lifted(ATTR_ACCESS),
        name: vendor.name,
        display_name: vendor.display_name,
        description: vendor.description.filter(|text| !text.is_empty()),
        approval_type: vendor.approval_type,
        status: None,
        attributes,
    }
}

/* -------------------------------------------------------------------------- */
/* Developers and apps */
/* -------------------------------------------------------------------------- */

pub fn developer_from_vendor(vendor: ApigeeDeveloper) -> Developer {
    Developer {
        created_at: timestamp(vendor.created_at.as_ref()),
        last_modified_at: timestamp(vendor.last_modified_at.as_ref()),
        email: vendor.email,
        first_name: vendor.first_name,
        last_name: vendor.last_name,
        user_name: vendor.user_name,
        developer_id: vendor.developer_id,
        organization: vendor.organization_name,
        status: vendor.status,
        apps: vendor.apps,
        attributes: attribute_map(vendor.attributes),
    }
}

pub fn app_from_vendor(vendor: ApigeeApp) -> App {
    App {
        created_at: timestamp(vendor.created_at.as_ref()),
        app_id: vendor.app_id,
        name: vendor.name,
        callback_url: vendor.callback_url.filter(|url| !url.is_empty()),
        status: vendor.status,
        api_products: vendor.api_products,
        credentials: vendor.credentials.into_iter().map(credential_from_vendor).collect(),
        attributes: attribute_map(vendor.attributes),
    }
}

/* -------------------------------------------------------------------------- */
/* Errors */
/* -------------------------------------------------------------------------- */

/// Neutral form of a vendor error body. A missing or unreadable code falls
/// back to the HTTP status the body arrived with.
pub fn remote_error_from_vendor(vendor: ApigeeError, http_status: u16) -> RemoteError {
    let code = match vendor.code {
        Some(ErrorCode::Number(code)) => code,
        Some(ErrorCode::Text(text)) => text.trim().parse().unwrap_or(http_status),
        None => http_status,
    };
    RemoteError::new(code, vendor.status, vendor.message)
}

fn attribute_map(attributes: Vec<KeyValue>) -> BTreeMap<String, String> {
    attributes.into_iter().map(|attr| (attr.name, attr.value)).collect()
}
