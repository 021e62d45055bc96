//! Resource paths under `/organizations/{org}`
//!
//! Every caller-supplied segment is percent-encoded, so product names with
//! spaces or developer emails with `+` address the intended resource.

use urlencoding::encode;

pub fn products(org: &str) -> String {
    format!("/organizations/{}/apiproducts?expand=true", encode(org))
}

pub fn product(org: &str, name: &str) -> String {
    format!("/organizations/{}/apiproducts/{}", encode(org), encode(name))
}

pub fn developer(org: &str, email: &str) -> String {
    format!("/organizations/{}/developers/{}", encode(org), encode(email))
}

pub fn app(org: &str, owner: &str, app: &str) -> String {
    format!("{}/apps/{}", developer(org, owner), encode(app))
}

pub fn credential(org: &str, owner: &str, app_name: &str, key: &str) -> String {
    format!("{}/keys/{}", app(org, owner, app_name), encode(key))
}

pub fn credential_product(
    org: &str,
    owner: &str,
    app_name: &str,
    key: &str,
    product: &str,
) -> String {
    format!("{}/apiproducts/{}", credential(org, owner, app_name, key), encode(product))
}
