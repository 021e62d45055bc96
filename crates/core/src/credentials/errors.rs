//! Reconciliation error types

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use apigate_domain::ApiGateError;
use thiserror::Error;

/// Step of the reconciliation that produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcilePhase {
    Fetch,
    Remove,
    Add,
}

impl fmt::Display for ReconcilePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Remove => "remove",
            Self::Add => "add",
        })
    }
}

/// What a failed reconciliation left behind on the remote credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteState {
    /// No mutation landed.
    Untouched,
    /// Some removals landed and the additive call did not; re-running the
    /// reconciliation converges from here.
    PartiallyReconciled,
    /// The additive call failed after it may have reached the remote side.
    /// Removals listed in the error landed; whether the additions did is
    /// unknown until the credential is read again.
    Unknown,
}

/// Errors returned by [`super::CredentialReconciler`]
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("credential {key} not found")]
    CredentialNotFound { key: String },

    /// A fetch or additive call failed at the transport level.
    #[error("{phase} failed for credential {key}: {source}")]
    Gateway {
        phase: ReconcilePhase,
        key: String,
        /// Products already detached before the failure
        removed: BTreeSet<String>,
        #[source]
        source: ApiGateError,
    },

    /// At least one removal failed; the additive call was not issued.
    #[error(
        "removed {} of {} products from credential {key}; failed: {}",
        .succeeded.len(),
        attempted(.succeeded, .failed),
        join_names(.failed)
    )]
    PartialReconciliation {
        key: String,
        succeeded: BTreeSet<String>,
        failed: BTreeMap<String, ApiGateError>,
    },
}

impl ReconcileError {
    pub fn phase(&self) -> ReconcilePhase {
        match self {
            Self::CredentialNotFound { .. } => ReconcilePhase::Fetch,
            Self::Gateway { phase, .. } => *phase,
            Self::PartialReconciliation { .. } => ReconcilePhase::Remove,
        }
    }

    /// State of the remote product set after this failure.
    ///
    /// An additive call that failed before reaching the remote side counts as
    /// not applied. One that failed afterwards (timeout, unreadable response)
    /// reports [`RemoteState::Unknown`].
    pub fn remote_state(&self) -> RemoteState {
        if let Self::Gateway { phase: ReconcilePhase::Add, source, .. } = self {
            if source.may_have_been_applied() {
                return RemoteState::Unknown;
            }
        }

        let removed_any = match self {
            Self::CredentialNotFound { .. } => false,
            Self::Gateway { removed, .. } => !removed.is_empty(),
            Self::PartialReconciliation { succeeded, .. } => !succeeded.is_empty(),
        };

        if removed_any {
            RemoteState::PartiallyReconciled
        } else {
            RemoteState::Untouched
        }
    }

    /// Products whose removal failed, empty for other variants.
    pub fn failed_products(&self) -> BTreeSet<&str> {
        match self {
            Self::PartialReconciliation { failed, .. } => {
                failed.keys().map(String::as_str).collect()
            }
            _ => BTreeSet::new(),
        }
    }
}

fn attempted(succeeded: &BTreeSet<String>, failed: &BTreeMap<String, ApiGateError>) -> usize {
    succeeded.len() + failed.len()
}

fn join_names(failed: &BTreeMap<String, ApiGateError>) -> String {
    failed.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
