//! Error types used throughout the client library

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::RemoteError;

/// Main error type for apigate
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ApiGateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    /// Structured rejection returned by the control plane in a response body.
    #[error("Remote rejection: {0}")]
    Rejected(RemoteError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiGateError {
    /// True when the remote side reported the addressed resource as missing,
    /// either through a transport status or a structured 404 body.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Rejected(remote) => remote.is_not_found(),
            _ => false,
        }
    }

    /// True when a mutation failing with this error may still have been
    /// applied remotely, because the request could have reached the server
    /// before the failure.
    pub fn may_have_been_applied(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Decode(_) | Self::Internal(_))
    }
}

/// Result type alias for apigate operations
pub type Result<T> = std::result::Result<T, ApiGateError>;
