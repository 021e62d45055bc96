//! Tracing subscriber setup for binaries and tests embedding the client

use apigate_domain::{ApiGateError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install a global `fmt` subscriber.
///
/// `RUST_LOG` overrides `default_filter` when set. With `json` the events
/// are written as one JSON object per line. Calling this again after a
/// subscriber is installed does nothing and returns `Ok(false)`.
///
/// # Errors
///
/// Returns `ApiGateError::Config` if `default_filter` is not a valid filter
/// directive
pub fn init_tracing(default_filter: &str, json: bool) -> Result<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| ApiGateError::Config(format!("Invalid log filter {default_filter}: {e}")))?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if json {
        registry.with(fmt::layer().json().with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()
    };

    Ok(installed.is_ok())
}
