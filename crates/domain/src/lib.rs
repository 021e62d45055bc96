//! # apigate Domain
//!
//! Neutral data model for API-management control planes.
//!
//! This crate contains:
//! - Catalog and consumer types (Product, Developer, App, Credential)
//! - The tagged remote outcome used for structured rejections
//! - Domain error types and Result definitions
//! - Client configuration and shared constants
//!
//! ## Architecture
//! - No dependencies on other apigate crates
//! - No vendor wire shapes; those live in `apigate-infra`

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

#[doc(hidden)]
pub use serde as __serde;
