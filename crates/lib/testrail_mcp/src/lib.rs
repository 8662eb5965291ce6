//! # testrail_mcp
//!
//! MCP (Model Context Protocol) tool synthesis for the TestRail client.
//!
//! The [`catalog::Catalog`] enumerates a client's modules once; tools are
//! rendered from it either as one routed tool per module or one tool per
//! operation, and every call goes through [`router::Dispatcher`].
//! `testrail_mcp_server` serves it over stdio or Streamable HTTP.

pub mod catalog;
pub mod hooks;
pub mod identity;
pub mod reshape;
pub mod router;
pub mod server;
pub mod tools;

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use testrail_core::ApiClient;
use tokio_util::sync::CancellationToken;

pub use catalog::Catalog;
pub use router::{ActionInvocation, DispatchError, Dispatcher};
pub use server::TestRailMcpServer;
pub use tools::ToolMode;

/// Default tool-name namespace.
pub const DEFAULT_NAMESPACE: &str = "testrail";

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build the catalog for `client` and wrap it in a server handler.
pub fn build_server(
    client: &dyn ApiClient,
    namespace: &str,
    mode: ToolMode,
    read_only: bool,
) -> TestRailMcpServer {
    let catalog = Arc::new(Catalog::build(client, namespace));
    let pipeline = Arc::new(hooks::default_pipeline(read_only));
    TestRailMcpServer::new(Arc::new(Dispatcher::new(catalog, pipeline)), mode)
}

/// Build an Axum router that serves the MCP Streamable HTTP endpoint at `/mcp`.
///
/// Every session gets a clone of `server`, so the catalog and the HTTP
/// connection pool are shared. `ct` ends open SSE streams on shutdown.
pub fn mcp_router(server: TestRailMcpServer, ct: CancellationToken) -> axum::Router {
    let service: StreamableHttpService<TestRailMcpServer, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(server.clone()),
            Arc::new(LocalSessionManager::default()),
            StreamableHttpServerConfig {
                stateful_mode: true,
                cancellation_token: ct,
                ..Default::default()
            },
        );

    axum::Router::new().nest_service("/mcp", service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }

    #[test]
    fn build_server_registers_every_testrail_module() {
        let config =
            testrail_core::ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "key")
                .expect("config");
        let client = testrail_core::TestRailClient::new(&config).expect("client");

        let server = build_server(&client, DEFAULT_NAMESPACE, ToolMode::Routed, false);
        assert_eq!(server.tools().len(), client.module_names().len());
        assert!(
            server
                .tools()
                .iter()
                .any(|t| t.name.as_ref() == "testrail_cases")
        );
    }

    #[test]
    fn catalog_build_is_repeatable() {
        let config =
            testrail_core::ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "key")
                .expect("config");
        let client = testrail_core::TestRailClient::new(&config).expect("client");

        let names = |catalog: &Catalog| -> Vec<(String, Vec<String>)> {
            catalog
                .modules()
                .map(|m| (m.module_name.clone(), m.action_names()))
                .collect()
        };
        let first = Catalog::build(&client, DEFAULT_NAMESPACE);
        let second = Catalog::build(&client, DEFAULT_NAMESPACE);
        assert_eq!(names(&first), names(&second));
    }

    #[tokio::test]
    async fn mcp_router_builds() {
        let config =
            testrail_core::ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "key")
                .expect("config");
        let client = testrail_core::TestRailClient::new(&config).expect("client");
        let server = build_server(&client, DEFAULT_NAMESPACE, ToolMode::Routed, true);
        let _router = mcp_router(server, CancellationToken::new());
    }
}
