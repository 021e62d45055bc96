//! Bearer token acquisition
//!
//! The gateway asks an [`AccessTokenProvider`] for a token before every
//! request. Two implementations ship with the crate: a fixed token from
//! configuration and the compute metadata server.

pub mod metadata;
pub mod provider;

pub use metadata::{MetadataTokenProvider, DEFAULT_METADATA_URL};
pub use provider::{AccessTokenProvider, StaticTokenProvider};
