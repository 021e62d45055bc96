//! Integration tests for the neutral model's serialized shape
//!
//! Callers persist and display these types, so field names and the
//! rejection tagging must stay stable.

use apigate_domain::{
    Credential, CredentialStatus, ProductLink, ProductLinkStatus, RemoteError, RemoteOutcome,
};
use serde_json::json;

#[test]
fn credential_serializes_with_neutral_field_names() {
    let credential = Credential::new("consumer-key")
        .with_product(ProductLink::with_status("weather", ProductLinkStatus::Approved))
        .with_product(ProductLink::named("maps"));

    let value = serde_json::to_value(&credential).unwrap();

    assert_eq!(value["key"], "consumer-key");
    assert_eq!(value["status"], "active");
    assert_eq!(
        value["products"],
        json!([{ "name": "weather", "status": "approved" }, { "name": "maps" }])
    );
    assert!(value.get("secret").is_none(), "empty secret is omitted");
}

#[test]
fn credential_with_unknown_statuses_keeps_them() {
    let value = json!({
        "key": "k",
        "status": "Suspended",
        "products": [{ "name": "p", "status": "Escalated" }]
    });

    let credential: Credential = serde_json::from_value(value).unwrap();

    assert_eq!(credential.status, CredentialStatus::Other("Suspended".into()));
    assert_eq!(
        credential.products[0].status,
        Some(ProductLinkStatus::Other("Escalated".into()))
    );
}

#[test]
fn rejected_outcome_carries_remote_error() {
    let outcome: RemoteOutcome<Credential> = RemoteOutcome::Rejected(RemoteError::new(
        400,
        "FAILED_PRECONDITION",
        "API product [ghost] does not exist",
    ));

    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["outcome"], "rejected");
    assert_eq!(value["payload"]["status"], "FAILED_PRECONDITION");

    let back: RemoteOutcome<Credential> = serde_json::from_value(value).unwrap();
    assert_eq!(back.rejection().map(|e| e.code), Some(400));
}
