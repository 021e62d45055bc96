//! Macro for implementing string conversions on remote status enums
//!
//! Status values come from the control plane and may grow new spellings at
//! any time. Every enum handled here carries an `Other(String)` variant that
//! keeps unknown values verbatim, so parsing never fails and a value read
//! from the remote side is written back exactly as it arrived.
//!
//! # Example
//!
//! ```rust
//! use apigate_domain::impl_remote_status_conversions;
//!
//! #[derive(Debug, Clone, PartialEq, Eq)]
//! pub enum DeployState {
//!     Ready,
//!     Progressing,
//!     Other(String),
//! }
//!
//! impl_remote_status_conversions!(DeployState {
//!     Ready => "ready" | "deployed",
//!     Progressing => "progressing",
//! });
//!
//! assert_eq!("DEPLOYED".parse::<DeployState>().unwrap(), DeployState::Ready);
//! assert_eq!(DeployState::Other("ERROR".into()).to_string(), "ERROR");
//! ```

/// Implements Display, FromStr, Serialize and Deserialize for remote status
/// enums with an `Other(String)` fallback variant.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str | $alias...` - Canonical lowercase spelling followed
///   by any additional spellings accepted when parsing
///
/// Parsing is case-insensitive and infallible; unmatched input lands in
/// `Other` with its original casing.
#[macro_export]
macro_rules! impl_remote_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => f.write_str($str),)+
                    Self::Other(raw) => f.write_str(raw),
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(match s.to_ascii_lowercase().as_str() {
                    $($str $(| $alias)* => Self::$variant,)+
                    _ => Self::Other(s.to_string()),
                })
            }
        }

        impl $crate::__serde::Serialize for $enum_name {
            fn serialize<S: $crate::__serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $enum_name {
            fn deserialize<D: $crate::__serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = <String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                match raw.parse::<Self>() {
                    Ok(status) => Ok(status),
                    Err(never) => match never {},
                }
            }
        }
    };
}
