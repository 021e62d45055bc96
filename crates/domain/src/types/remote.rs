//! Structured remote rejections
//!
//! The control plane reports domain-level failures ("product does not
//! exist") in an ordinary response body. Those are results, not transport
//! failures, and [`RemoteOutcome`] forces callers to look at them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Neutral form of a vendor error body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// HTTP-style status code reported by the remote side
    pub code: u16,
    /// Machine-readable status name (e.g. `NOT_FOUND`, `FAILED_PRECONDITION`)
    pub status: String,
    pub message: String,
}

impl RemoteError {
    pub fn new(code: u16, status: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code, status: status.into(), message: message.into() }
    }

    pub fn is_not_found(&self) -> bool {
        self.code == 404
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.status.is_empty() {
            write!(f, "{}: {}", self.code, self.message)
        } else {
            write!(f, "{} {}: {}", self.code, self.status, self.message)
        }
    }
}

/// Result of a remote mutation that may be rejected in-band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "payload", rename_all = "snake_case")]
pub enum RemoteOutcome<T> {
    /// The remote side applied the request and returned its representation.
    Accepted(T),
    /// The remote side refused the request with a structured error body.
    Rejected(RemoteError),
}

impl<T> RemoteOutcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&RemoteError> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected(err) => Some(err),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> RemoteOutcome<U> {
        match self {
            Self::Accepted(value) => RemoteOutcome::Accepted(f(value)),
            Self::Rejected(err) => RemoteOutcome::Rejected(err),
        }
    }

    /// Convert into a plain result, treating a rejection as an error.
    pub fn into_result(self) -> crate::Result<T> {
        match self {
            Self::Accepted(value) => Ok(value),
            Self::Rejected(err) => Err(crate::ApiGateError::Rejected(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiGateError;

    #[test]
    fn display_includes_status_when_present() {
        let err = RemoteError::new(400, "FAILED_PRECONDITION", "API product X does not exist");
        assert_eq!(err.to_string(), "400 FAILED_PRECONDITION: API product X does not exist");
        assert_eq!(RemoteError::new(409, "", "conflict").to_string(), "409: conflict");
    }

    #[test]
    fn rejection_becomes_domain_error() {
        let outcome: RemoteOutcome<u8> = RemoteOutcome::Rejected(RemoteError::new(400, "", "bad"));
        assert!(outcome.rejection().is_some());
        assert!(matches!(outcome.into_result(), Err(ApiGateError::Rejected(e)) if e.code == 400));
    }

    #[test]
    fn map_keeps_rejection() {
        let accepted: RemoteOutcome<u8> = RemoteOutcome::Accepted(2);
        assert_eq!(accepted.map(|v| v * 2), RemoteOutcome::Accepted(4));

        let rejected: RemoteOutcome<u8> = RemoteOutcome::Rejected(RemoteError::new(404, "NOT_FOUND", "x"));
        assert!(!rejected.map(|v| v * 2).is_accepted());
    }

    #[test]
    fn serializes_as_tagged_outcome() {
        let outcome: RemoteOutcome<u8> = RemoteOutcome::Rejected(RemoteError::new(400, "INVALID", "nope"));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(json["payload"]["code"], 400);
    }
}
