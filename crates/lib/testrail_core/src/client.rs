// @zen-component: TR-Client
//
//! TestRail client: one shared transport plus the resource modules.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::{ClientConfig, ConfigError};
use crate::error::EnumerationError;
use crate::operation::BoundOperation;
use crate::resources::{self, MODULE_NAMES, Resource};
use crate::transport::HttpTransport;

/// A named grouping of remote procedures for one resource domain.
pub trait ApiModule: Send + Sync {
    /// Enumerate this module's operations, bound to this instance.
    fn operations(&self) -> Result<Vec<BoundOperation>, EnumerationError>;
}

/// A client exposing a fixed, known set of named modules.
pub trait ApiClient: Send + Sync {
    /// Every module name the client may expose, in registration order.
    fn module_names(&self) -> &[&'static str];

    /// The module registered under `name`, if present on this client.
    fn module(&self, name: &str) -> Option<&dyn ApiModule>;
}

/// Client for one TestRail instance.
pub struct TestRailClient {
    transport: Arc<HttpTransport>,
    modules: BTreeMap<&'static str, Resource>,
}

impl TestRailClient {
    /// Build a client with every resource module enabled.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        Self::with_disabled_modules(config, &[])
    }

    /// Build a client from `TESTRAIL_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(&ClientConfig::from_env()?)
    }

    /// Build a client, leaving out the named modules.
    ///
    /// Unknown names in `disabled` are ignored.
    pub fn with_disabled_modules(
        config: &ClientConfig,
        disabled: &[String],
    ) -> Result<Self, ConfigError> {
        let transport = Arc::new(HttpTransport::new(config)?);
        let modules = MODULE_NAMES
            .iter()
            .filter(|name| !disabled.iter().any(|d| d == *name))
            .filter_map(|&name| {
                resources::endpoints(name)
                    .map(|table| (name, Resource::new(table, transport.clone())))
            })
            .collect::<BTreeMap<_, _>>();

        debug!(
            base_url = transport.base_url(),
            modules = modules.len(),
            "TestRail client constructed"
        );

        Ok(Self { transport, modules })
    }

    pub fn transport(&self) -> &Arc<HttpTransport> {
        &self.transport
    }

    /// Direct access to a resource module.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.modules.get(name)
    }
}

impl ApiClient for TestRailClient {
    fn module_names(&self) -> &[&'static str] {
        MODULE_NAMES
    }

    fn module(&self, name: &str) -> Option<&dyn ApiModule> {
        self.modules.get(name).map(|m| m as &dyn ApiModule)
    }
}
