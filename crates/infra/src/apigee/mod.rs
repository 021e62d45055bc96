//! Management API adapter
//!
//! Wire models, translation to the neutral domain types, resource paths and
//! the [`ApigeeGateway`] that implements the core ports over HTTP.

pub mod client;
pub mod gateway;
pub mod models;
pub mod paths;
pub mod translate;

pub use client::ApiClient;
pub use gateway::ApigeeGateway;
