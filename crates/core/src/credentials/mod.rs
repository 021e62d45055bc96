//! Credential product affiliation
//!
//! The remote side only offers "add these products" and "remove this one
//! product" on a credential. [`CredentialReconciler`] turns those two
//! primitives into "make the product set equal to this".

pub mod errors;
pub mod locks;
pub mod plan;
pub mod ports;
pub mod service;

pub use service::CredentialReconciler;
