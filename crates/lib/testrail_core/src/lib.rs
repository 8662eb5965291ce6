//! # testrail_core
//!
//! TestRail API v2 client.
//!
//! Resource modules are declared as static operation tables
//! ([`operation::Endpoint`]) and bound to one shared
//! [`transport::HttpTransport`], which owns the connection pool, basic auth,
//! the bounded retry policy and the [`error::ApiError`] taxonomy.

pub mod client;
pub mod config;
pub mod error;
pub mod operation;
pub mod resources;
pub mod transport;

pub use client::{ApiClient, ApiModule, TestRailClient};
pub use config::{ClientConfig, ConfigError};
pub use error::{ApiError, ArgumentError, EnumerationError, InvokeError};
pub use operation::{BoundOperation, Invoke, ParamDefault, ParamKind, ParamLocation, ParamSpec};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
