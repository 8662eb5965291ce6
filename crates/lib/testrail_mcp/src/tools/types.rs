// @zen-component: MCP-RouterToolTypes
//
//! Argument types of the routed module tools.

use schemars::JsonSchema;
use serde::Deserialize;

/// Arguments of a `<namespace>_<module>` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RouterRequest {
    /// Name of the module operation to run.
    pub action: String,
    /// Named arguments for the action. Omit or pass null for actions without parameters.
    pub params: Option<serde_json::Map<String, serde_json::Value>>,
}
