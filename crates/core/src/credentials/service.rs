//! Credential reconciliation service - core business logic

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use apigate_domain::{ApiGateError, Credential, RemoteOutcome};
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::errors::{ReconcileError, ReconcilePhase};
use super::plan::plan_reconciliation;
use super::ports::CredentialGateway;

/// Converges a credential's remote product set onto a desired set
///
/// The sequence is fetch, diff, remove the extras concurrently, then one
/// additive call with the full desired list. The additive call is only
/// issued once every removal has succeeded.
///
/// No locking happens here. Two reconciliations racing on the same key can
/// lose an update; callers serialise per key (see
/// [`super::locks::CredentialLocks`]).
pub struct CredentialReconciler {
    gateway: Arc<dyn CredentialGateway>,
}

impl CredentialReconciler {
    /// Create a new reconciler over `gateway`
    pub fn new(gateway: Arc<dyn CredentialGateway>) -> Self {
        Self { gateway }
    }

    /// Make the products on `desired.key` equal to `desired.products`.
    ///
    /// Only the key and product names of `desired` are used; duplicate names
    /// collapse to one entry. An empty product list detaches everything.
    ///
    /// # Returns
    ///
    /// The remote representation after the additive call, or the structured
    /// rejection the remote side answered it with. A rejection still means
    /// every removal landed.
    ///
    /// # Errors
    ///
    /// - [`ReconcileError::CredentialNotFound`] when the key does not exist
    /// - [`ReconcileError::PartialReconciliation`] when any removal failed
    /// - [`ReconcileError::Gateway`] for transport failures on fetch or add
    #[instrument(skip(self, desired), fields(owner = %owner, app = %app, key = %desired.key))]
    pub async fn reconcile_products(
        &self,
        owner: &str,
        app: &str,
        desired: &Credential,
    ) -> Result<RemoteOutcome<Credential>, ReconcileError> {
        let key = desired.key.as_str();

        let current =
            self.gateway.get_credential(owner, app, key).await.map_err(|source| {
                if source.is_not_found() {
                    ReconcileError::CredentialNotFound { key: key.to_string() }
                } else {
                    ReconcileError::Gateway {
                        phase: ReconcilePhase::Fetch,
                        key: key.to_string(),
                        removed: BTreeSet::new(),
                        source,
                    }
                }
            })?;

        let plan = plan_reconciliation(&current, desired);
        debug!(
            current = current.products.len(),
            desired = plan.desired.len(),
            to_remove = plan.to_remove.len(),
            "Planned credential reconciliation"
        );

        let removed = if plan.requires_removals() {
            self.remove_products(owner, app, key, &plan.to_remove).await?
        } else {
            BTreeSet::new()
        };

        let names = plan.desired_names();
        let outcome = self.gateway.set_products(owner, app, key, &names).await.map_err(
            |source| ReconcileError::Gateway {
                phase: ReconcilePhase::Add,
                key: key.to_string(),
                removed,
                source,
            },
        )?;

        match &outcome {
            RemoteOutcome::Accepted(credential) => {
                info!(products = credential.products.len(), "Credential reconciled");
            }
            RemoteOutcome::Rejected(rejection) => {
                warn!(code = rejection.code, status = %rejection.status, "Additive call rejected");
            }
        }

        Ok(outcome)
    }

    /// Issue every removal at once and wait for all of them to settle.
    async fn remove_products(
        &self,
        owner: &str,
        app: &str,
        key: &str,
        products: &[String],
    ) -> Result<BTreeSet<String>, ReconcileError> {
        let removals = products.iter().map(|product| async move {
            let result = self.gateway.remove_product(owner, app, key, product).await;
            (product, result)
        });

        let mut succeeded = BTreeSet::new();
        let mut failed: BTreeMap<String, ApiGateError> = BTreeMap::new();

        for (product, result) in join_all(removals).await {
            match result {
                Ok(()) => {
                    succeeded.insert(product.clone());
                }
                Err(err) => {
                    debug!(product = %product, error = %err, "Product removal failed");
                    failed.insert(product.clone(), err);
                }
            }
        }

        if failed.is_empty() {
            debug!(removed = succeeded.len(), "All product removals settled");
            return Ok(succeeded);
        }

        warn!(
            succeeded = succeeded.len(),
            failed = failed.len(),
            "Product removals failed; skipping additive call"
        );
        Err(ReconcileError::PartialReconciliation { key: key.to_string(), succeeded, failed })
    }
}
