//! Caller-side serialisation of reconciliations
//!
//! Reconciling the same credential twice at once can lose an update: one
//! run's additive call may re-attach a product the other run just removed.
//! [`CredentialLocks`] hands out one async mutex per `(app, key)` pair so
//! callers can keep at most one reconciliation in flight per credential.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockKey = (String, String);

/// Registry of per-credential async locks
#[derive(Debug, Default, Clone)]
pub struct CredentialLocks {
    locks: Arc<DashMap<LockKey, Arc<Mutex<()>>>>,
}

impl CredentialLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to the credential `key` of `app`.
    ///
    /// The lock is released when the guard is dropped.
    pub async fn acquire(&self, app: &str, key: &str) -> OwnedMutexGuard<()> {
        let lock = self.locks.entry((app.to_string(), key.to_string())).or_default().clone();
        lock.lock_owned().await
    }

    /// Number of credentials with a registered lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Forget locks that nobody holds or waits on.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}
