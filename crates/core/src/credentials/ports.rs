//! Port interfaces for credential state
//!
//! These traits define the boundary between the reconciler and the
//! authenticated transport that talks to the control plane.

use apigate_domain::{Credential, RemoteOutcome, Result};
use async_trait::async_trait;

/// Single-resource operations on an app credential
///
/// `owner` and `app` are opaque references passed through unchanged.
#[async_trait]
pub trait CredentialGateway: Send + Sync {
    /// Read the current state of a credential.
    ///
    /// A missing credential must surface as an error for which
    /// [`apigate_domain::ApiGateError::is_not_found`] holds.
    async fn get_credential(&self, owner: &str, app: &str, key: &str) -> Result<Credential>;

    /// Detach one product from a credential.
    async fn remove_product(&self, owner: &str, app: &str, key: &str, product: &str)
        -> Result<()>;

    /// Attach `products` to a credential and return the resulting state.
    ///
    /// An empty slice is sent as an explicit empty list. Structured remote
    /// rejections resolve as [`RemoteOutcome::Rejected`]; only transport
    /// level failures are errors.
    async fn set_products(
        &self,
        owner: &str,
        app: &str,
        key: &str,
        products: &[String],
    ) -> Result<RemoteOutcome<Credential>>;
}
