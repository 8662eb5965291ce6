//! TestRail MCP server binary.
//!
//! Serves one routed tool per TestRail resource module over stdio (default)
//! or Streamable HTTP at `/mcp`. Logs go to stderr; stdout belongs to the
//! stdio transport.

use clap::{Parser, ValueEnum};
use rmcp::ServiceExt;
use testrail_core::config::{ENV_API_KEY, ENV_URL, ENV_USERNAME};
use testrail_core::{ClientConfig, ConfigError, TestRailClient};
use testrail_mcp::{Catalog, DEFAULT_NAMESPACE, ToolMode, identity};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_LOG_FILTER: &str = "info,testrail_core=debug,testrail_mcp=debug";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Transport {
    Stdio,
    Http,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ToolModeArg {
    /// One `<namespace>_<module>` tool per module.
    Routed,
    /// One `<namespace>_<module>_<operation>` tool per operation.
    PerOperation,
}

impl From<ToolModeArg> for ToolMode {
    fn from(arg: ToolModeArg) -> Self {
        match arg {
            ToolModeArg::Routed => ToolMode::Routed,
            ToolModeArg::PerOperation => ToolMode::PerOperation,
        }
    }
}

/// CLI arguments for the TestRail MCP server.
#[derive(Parser, Debug)]
#[command(name = "testrail_mcp_server", version, about = "TestRail MCP server")]
struct Args {
    /// MCP transport to serve.
    #[arg(long, value_enum, default_value_t = Transport::Stdio)]
    transport: Transport,

    /// Port for the HTTP transport (0 = ephemeral).
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Prefix of every tool name.
    #[arg(long, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    /// Tool surface to register.
    #[arg(long, value_enum, default_value_t = ToolModeArg::Routed)]
    tool_mode: ToolModeArg,

    /// Reject actions that modify TestRail data.
    #[arg(long, default_value_t = false)]
    read_only: bool,

    /// Leave a resource module out of the client (repeatable).
    #[arg(long = "disable-module", value_name = "MODULE")]
    disabled_modules: Vec<String>,

    /// Print every tool name in both naming schemes and exit.
    #[arg(long, default_value_t = false)]
    list_tools: bool,

    /// TestRail base URL.
    #[arg(long, env = ENV_URL)]
    url: Option<String>,

    /// TestRail user (email).
    #[arg(long, env = ENV_USERNAME)]
    username: Option<String>,

    /// TestRail API key.
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,
}

/// Flags override environment; remaining settings come from `TESTRAIL_*`.
fn resolve_config(args: &Args) -> Result<ClientConfig, ConfigError> {
    ClientConfig::from_lookup(|key| match key {
        ENV_URL => args.url.clone(),
        ENV_USERNAME => args.username.clone(),
        ENV_API_KEY => args.api_key.clone(),
        other => std::env::var(other).ok(),
    })
}

fn print_tools(catalog: &Catalog) {
    let ns = catalog.namespace();
    for module in catalog.modules() {
        println!("{}", identity::router_tool_name(ns, &module.module_name));
        for op in module.operations.values() {
            println!(
                "  {}{}",
                identity::operation_tool_name(ns, &module.module_name, &op.name),
                op.signature
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Write logs to stderr so stdout stays free for the stdio transport.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();

    let config = resolve_config(&args)
        .inspect_err(|e| error!(error = %e, "TestRail connection is not configured"))?;
    let client = TestRailClient::with_disabled_modules(&config, &args.disabled_modules)?;

    let server = testrail_mcp::build_server(
        &client,
        &args.namespace,
        args.tool_mode.into(),
        args.read_only,
    );

    if args.list_tools {
        print_tools(server.catalog());
        return Ok(());
    }

    info!(
        base_url = %config.base_url,
        transport = ?args.transport,
        tool_mode = ?args.tool_mode,
        read_only = args.read_only,
        modules = server.catalog().modules().count(),
        tools = server.tools().len(),
        "starting testrail_mcp_server"
    );

    match args.transport {
        Transport::Stdio => {
            let service = server.serve(rmcp::transport::stdio()).await?;
            let reason = service.waiting().await?;
            info!(?reason, "stdio session ended");
        }
        Transport::Http => {
            let ct = CancellationToken::new();
            let app = testrail_mcp::mcp_router(server, ct.clone());
            let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", args.port)).await?;
            info!(addr = %listener.local_addr()?, "MCP server listening on /mcp");

            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    if let Err(e) = tokio::signal::ctrl_c().await {
                        error!(error = %e, "failed to listen for Ctrl-C");
                    }
                    info!("shutting down");
                    ct.cancel();
                })
                .await?;
        }
    }

    Ok(())
}
