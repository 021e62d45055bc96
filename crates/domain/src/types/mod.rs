//! Domain types and models

pub mod app;
pub mod credential;
pub mod developer;
pub mod product;
pub mod remote;

pub use app::App;
pub use credential::{Credential, CredentialStatus, ProductLink, ProductLinkStatus};
pub use developer::Developer;
pub use product::Product;
pub use remote::{RemoteError, RemoteOutcome};
