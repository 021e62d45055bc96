//! Shared helpers for infra integration tests
#![allow(dead_code)]

use std::sync::Arc;

use apigate_domain::ClientConfig;
use apigate_infra::{ApigeeGateway, StaticTokenProvider};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const ORG: &str = "acme";
pub const OWNER: &str = "dev@example.com";
pub const APP: &str = "weather-app";
pub const KEY: &str = "consumer-key-1";
pub const TOKEN: &str = "test-token";

/// Path of the test credential as it appears on the wire.
pub fn credential_path() -> String {
    format!("/organizations/{ORG}/developers/dev%40example.com/apps/{APP}/keys/{KEY}")
}

pub fn credential_product_path(product: &str) -> String {
    format!("{}/apiproducts/{}", credential_path(), product)
}

/// Gateway for [`ORG`] pointed at `server` with a fixed token.
pub fn gateway(server: &MockServer) -> ApigeeGateway {
    let config = ClientConfig::for_organization(ORG).with_base_url(server.uri());
    let auth = Arc::new(StaticTokenProvider::new(TOKEN).expect("token provider"));
    ApigeeGateway::new(config, auth).expect("gateway")
}

/// Vendor credential body carrying `products`, all approved.
pub fn credential_body(products: &[&str]) -> Value {
    json!({
        "consumerKey": KEY,
        "consumerSecret": "secret",
        "issuedAt": "1700000000000",
        "expiresAt": "-1",
        "status": "approved",
        "scopes": [],
        "apiProducts": products
            .iter()
            .map(|name| json!({ "apiproduct": name, "status": "approved" }))
            .collect::<Vec<_>>(),
    })
}

pub fn error_body(code: u16, status: &str, message: &str) -> Value {
    json!({ "error": { "code": code, "message": message, "status": status } })
}
