//! Library constants
//!
//! Centralized location for defaults and vendor conventions shared by the
//! domain, core and infrastructure crates.

// Connection defaults
pub const DEFAULT_BASE_URL: &str = "https://apigee.googleapis.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("apigate/", env!("CARGO_PKG_VERSION"));

// Vendor product attribute names lifted into first-class fields
pub const ATTR_IMAGE: &str = "image";
pub const ATTR_SPEC: &str = "spec";
pub const ATTR_ACCESS: &str = "access";
pub const ATTR_TYPE: &str = "type";

/// Vendor encoding for "never expires" on credential timestamps
pub const NEVER_EXPIRES: &str = "-1";
