//! Conversions from external infrastructure errors into domain errors.

use apigate_domain::ApiGateError;
use reqwest::Error as HttpError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub ApiGateError);

impl From<InfraError> for ApiGateError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<ApiGateError> for InfraError {
    fn from(value: ApiGateError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoApiGateError {
    fn into_apigate(self) -> ApiGateError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → ApiGateError */
/* -------------------------------------------------------------------------- */

impl IntoApiGateError for HttpError {
    fn into_apigate(self) -> ApiGateError {
        if self.is_timeout() {
            return ApiGateError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return ApiGateError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return ApiGateError::Decode(self.to_string());
        }

        if let Some(status) = self.status() {
            return status_error(status.as_u16(), status.canonical_reason());
        }

        if self.is_builder() {
            return ApiGateError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        ApiGateError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_apigate())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → ApiGateError */
/* -------------------------------------------------------------------------- */

impl IntoApiGateError for JsonError {
    fn into_apigate(self) -> ApiGateError {
        ApiGateError::Decode(format!("invalid JSON at line {}: {}", self.line(), self))
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_apigate())
    }
}

/// Classify an unsuccessful HTTP status whose body carried no structured
/// rejection.
pub(crate) fn status_error(code: u16, reason: Option<&str>) -> ApiGateError {
    let message = format!("HTTP {} {}", code, reason.unwrap_or("unknown status"));

    match code {
        401 | 403 => ApiGateError::Auth(message),
        404 => ApiGateError::NotFound(message),
        429 => ApiGateError::Network(message),
        400..=499 => ApiGateError::InvalidInput(message),
        _ => ApiGateError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
