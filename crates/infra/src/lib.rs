//! # apigate Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The management API gateway (HTTP, vendor wire models, translation)
//! - Bearer token providers
//! - Configuration loading from environment and files
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Implements traits defined in `apigate-core`
//! - Depends on `apigate-domain` and `apigate-core`
//! - Contains all "impure" code (network, environment, filesystem)

pub mod apigee;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod telemetry;

// Re-export commonly used items
pub use apigee::ApigeeGateway;
pub use auth::{AccessTokenProvider, MetadataTokenProvider, StaticTokenProvider};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use telemetry::init_tracing;
