// @zen-component: MCP-Server
//
//! MCP server handler exposing the TestRail catalog as tools.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    model::*,
    service::{RequestContext, RoleServer},
};
use serde_json::json;
use tracing::debug;

use crate::catalog::Catalog;
use crate::router::{DispatchError, Dispatcher};
use crate::tools::{self, ToolMode};

/// TestRail MCP server handler.
///
/// Tools are rendered once from the catalog at construction. `call_tool`
/// accepts both naming schemes regardless of the registered mode. Cloned per
/// session by the Streamable HTTP factory.
#[derive(Clone)]
pub struct TestRailMcpServer {
    dispatcher: Arc<Dispatcher>,
    tools: Arc<Vec<Tool>>,
}

/// Serialize a value to a pretty JSON CallToolResult.
fn json_result<T: serde::Serialize>(value: &T) -> Result<CallToolResult, ErrorData> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ErrorData::new(ErrorCode::INTERNAL_ERROR, e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

impl From<DispatchError> for ErrorData {
    fn from(err: DispatchError) -> Self {
        let message = err.to_string();
        match err {
            DispatchError::UnknownTool(tool) => {
                ErrorData::new(ErrorCode::INVALID_PARAMS, message, Some(json!({"tool": tool})))
            }
            DispatchError::UnknownModule(module) => ErrorData::new(
                ErrorCode::INVALID_PARAMS,
                message,
                Some(json!({"module": module})),
            ),
            DispatchError::InvalidArguments { tool, .. } => {
                ErrorData::new(ErrorCode::INVALID_PARAMS, message, Some(json!({"tool": tool})))
            }
            DispatchError::InvalidAction {
                module,
                action,
                valid,
            } => ErrorData::new(
                ErrorCode::INVALID_PARAMS,
                message,
                Some(json!({"module": module, "action": action, "valid_actions": valid})),
            ),
            DispatchError::MissingParameters {
                module,
                action,
                missing,
            } => ErrorData::new(
                ErrorCode::INVALID_PARAMS,
                message,
                Some(json!({"module": module, "action": action, "missing": missing})),
            ),
            DispatchError::InvalidParameters {
                module,
                action,
                required,
                ..
            } => ErrorData::new(
                ErrorCode::INVALID_PARAMS,
                message,
                Some(json!({"module": module, "action": action, "required": required})),
            ),
            DispatchError::Rejected(_) => ErrorData::new(ErrorCode::INVALID_REQUEST, message, None),
            DispatchError::Upstream(e) => {
                let retry_after = match &e {
                    testrail_core::ApiError::RateLimit { retry_after, .. } => *retry_after,
                    _ => None,
                };
                ErrorData::new(
                    ErrorCode::INTERNAL_ERROR,
                    message,
                    Some(json!({
                        "type": e.kind(),
                        "status": e.status(),
                        "retry_after": retry_after,
                    })),
                )
            }
        }
    }
}

impl TestRailMcpServer {
    pub fn new(dispatcher: Arc<Dispatcher>, mode: ToolMode) -> Self {
        let tools = tools::build_tools(dispatcher.catalog(), mode);
        debug!(?mode, tools = tools.len(), "MCP tools registered");
        Self {
            dispatcher,
            tools: Arc::new(tools),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        self.dispatcher.catalog()
    }

    /// Tool definitions registered by this server.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Run one tool call and render its result.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, ErrorData> {
        let value = self.dispatcher.call_tool(name, arguments).await?;
        json_result(&value)
    }
}

impl ServerHandler for TestRailMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "TestRail MCP server. Each `{}_<module>` tool runs the action named in `action` \
                 with the arguments in `params`.",
                self.dispatcher.catalog().namespace()
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.to_vec()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        self.call(&request.name, request.arguments).await
    }
}
