//! In-memory credential gateway
//!
//! Holds credentials' product lists and applies removals and additions to
//! them, recording every call in order. Individual operations can be
//! scripted to fail.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use apigate_core::CredentialGateway;
use apigate_domain::{
    ApiGateError, Credential, ProductLink, ProductLinkStatus, RemoteError, RemoteOutcome,
    Result as DomainResult,
};
use async_trait::async_trait;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get { key: String },
    Remove { key: String, product: String },
    Set { key: String, products: Vec<String> },
}

#[derive(Default)]
struct State {
    credentials: HashMap<String, Credential>,
    calls: Vec<Call>,
    failing_removals: HashMap<String, ApiGateError>,
    fetch_error: Option<ApiGateError>,
    set_error: Option<ApiGateError>,
    set_rejection: Option<RemoteError>,
    removals_in_flight: usize,
    peak_removals_in_flight: usize,
}

/// Scriptable in-memory implementation of [`CredentialGateway`].
#[derive(Clone, Default)]
pub struct InMemoryGateway {
    state: Arc<Mutex<State>>,
}

impl InMemoryGateway {
    /// Gateway seeded with one credential holding `products` (all approved).
    pub fn with_credential(key: &str, products: &[&str]) -> Self {
        let mut credential = Credential::new(key);
        credential.products = products
            .iter()
            .map(|name| ProductLink::with_status(*name, ProductLinkStatus::Approved))
            .collect();

        let gateway = Self::default();
        gateway.state.lock().unwrap().credentials.insert(key.to_string(), credential);
        gateway
    }

    pub fn fail_removal_of(self, product: &str, error: ApiGateError) -> Self {
        self.state.lock().unwrap().failing_removals.insert(product.to_string(), error);
        self
    }

    pub fn fail_fetch_with(self, error: ApiGateError) -> Self {
        self.state.lock().unwrap().fetch_error = Some(error);
        self
    }

    pub fn fail_set_with(self, error: ApiGateError) -> Self {
        self.state.lock().unwrap().set_error = Some(error);
        self
    }

    pub fn reject_set_with(self, rejection: RemoteError) -> Self {
        self.state.lock().unwrap().set_rejection = Some(rejection);
        self
    }

    /// Stop failing removals, as if a transient fault cleared.
    pub fn heal(&self) {
        self.state.lock().unwrap().failing_removals.clear();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn removals(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Remove { product, .. } => Some(product),
                _ => None,
            })
            .collect()
    }

    pub fn set_calls(&self) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Set { products, .. } => Some(products),
                _ => None,
            })
            .collect()
    }

    /// Highest number of `remove_product` calls that were pending at once.
    pub fn peak_removals_in_flight(&self) -> usize {
        self.state.lock().unwrap().peak_removals_in_flight
    }

    pub fn remote_products(&self, key: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .credentials
            .get(key)
            .map(|credential| credential.product_names().map(str::to_string).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl CredentialGateway for InMemoryGateway {
    async fn get_credential(&self, _owner: &str, _app: &str, key: &str) -> DomainResult<Credential> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get { key: key.to_string() });

        if let Some(err) = state.fetch_error.clone() {
            return Err(err);
        }

        state
            .credentials
            .get(key)
            .cloned()
            .ok_or_else(|| ApiGateError::NotFound(format!("credential {key}")))
    }

    async fn remove_product(
        &self,
        _owner: &str,
        _app: &str,
        key: &str,
        product: &str,
    ) -> DomainResult<()> {
        {
            let mut state = self.state.lock().unwrap();
            state.removals_in_flight += 1;
            state.peak_removals_in_flight =
                state.peak_removals_in_flight.max(state.removals_in_flight);
        }

        // Yield so concurrent removals interleave like real I/O.
        tokio::task::yield_now().await;

        let mut state = self.state.lock().unwrap();
        state.removals_in_flight -= 1;
        state.calls.push(Call::Remove { key: key.to_string(), product: product.to_string() });

        if let Some(err) = state.failing_removals.get(product).cloned() {
            return Err(err);
        }

        let credential = state
            .credentials
            .get_mut(key)
            .ok_or_else(|| ApiGateError::NotFound(format!("credential {key}")))?;
        credential.products.retain(|link| link.name != product);
        Ok(())
    }

    async fn set_products(
        &self,
        _owner: &str,
        _app: &str,
        key: &str,
        products: &[String],
    ) -> DomainResult<RemoteOutcome<Credential>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Set { key: key.to_string(), products: products.to_vec() });

        if let Some(err) = state.set_error.clone() {
            return Err(err);
        }
        if let Some(rejection) = state.set_rejection.clone() {
            return Ok(RemoteOutcome::Rejected(rejection));
        }

        let credential = state
            .credentials
            .get_mut(key)
            .ok_or_else(|| ApiGateError::NotFound(format!("credential {key}")))?;

        // Union semantics: existing grants stay, new names are appended.
        let existing: HashSet<String> = credential.product_names().map(str::to_string).collect();
        for name in products {
            if !existing.contains(name) {
                credential
                    .products
                    .push(ProductLink::with_status(name.clone(), ProductLinkStatus::Approved));
            }
        }

        Ok(RemoteOutcome::Accepted(credential.clone()))
    }
}
