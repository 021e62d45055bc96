//! # apigate Core
//!
//! Business logic layer - no transport dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote control plane
//! - The credential-product reconciler
//! - Caller-side helpers for serialising reconciliations
//!
//! ## Architecture Principles
//! - Only depends on `apigate-domain`
//! - No HTTP or vendor wire shapes
//! - All remote access via traits
//! - Pure, testable planning logic

pub mod catalog;
pub mod credentials;

// Re-export specific items to avoid ambiguity
pub use catalog::ports::ProductCatalog;
pub use credentials::errors::{ReconcileError, ReconcilePhase, RemoteState};
pub use credentials::locks::CredentialLocks;
pub use credentials::plan::{dedup_links, plan_reconciliation, ReconciliationPlan};
pub use credentials::ports::CredentialGateway;
pub use credentials::CredentialReconciler;
