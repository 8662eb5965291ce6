// @zen-component: MCP-ToolSurface
//
//! MCP tool definitions generated from the operation catalog.
//!
//! [`ToolMode::Routed`] registers one tool per module taking an `action`
//! plus `params`; [`ToolMode::PerOperation`] registers one tool per
//! operation. Both are rendered from the same [`Catalog`].

pub mod types;

use std::fmt::Write as _;
use std::sync::Arc;

use rmcp::model::{JsonObject, Tool};
use serde_json::{Value, json};

use crate::catalog::{Catalog, ModuleDescriptor, OperationDescriptor};
use crate::identity;
use types::RouterRequest;

/// Which tool surface the server registers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolMode {
    #[default]
    Routed,
    PerOperation,
}

/// All tools for `mode`, modules in name order.
pub fn build_tools(catalog: &Catalog, mode: ToolMode) -> Vec<Tool> {
    let ns = catalog.namespace();
    match mode {
        ToolMode::Routed => catalog.modules().map(|m| router_tool(ns, m)).collect(),
        ToolMode::PerOperation => catalog
            .modules()
            .flat_map(|m| {
                m.operations
                    .values()
                    .map(move |op| operation_tool(ns, &m.module_name, op))
            })
            .collect(),
    }
}

pub fn router_tool(namespace: &str, module: &ModuleDescriptor) -> Tool {
    Tool::new(
        identity::router_tool_name(namespace, &module.module_name),
        describe_module(module),
        Arc::new(router_input_schema(module)),
    )
}

pub fn operation_tool(namespace: &str, module: &str, op: &OperationDescriptor) -> Tool {
    let description = if op.summary.is_empty() {
        format!("{}{}", op.name, op.signature)
    } else {
        format!("{}\n\n{}{}", op.summary, op.name, op.signature)
    };
    Tool::new(
        identity::operation_tool_name(namespace, module, &op.name),
        description,
        Arc::new(op.signature.input_schema()),
    )
}

/// Description of a routed tool: one line per action with its signature and summary.
pub fn describe_module(module: &ModuleDescriptor) -> String {
    let mut out = format!(
        "TestRail {} operations. Set `action` to one of the actions below and pass its \
         arguments in `params`.\n\nActions:",
        module.module_name
    );
    for op in module.operations.values() {
        let _ = write!(out, "\n- {}{}", op.name, op.signature);
        if !op.summary.is_empty() {
            let _ = write!(out, ": {}", op.summary);
        }
    }
    out
}

/// Schema of a routed tool: `action` restricted to the module's action names,
/// `params` an optional object.
pub fn router_input_schema(module: &ModuleDescriptor) -> JsonObject {
    let mut schema = match serde_json::to_value(schemars::schema_for!(RouterRequest)) {
        Ok(Value::Object(map)) => map,
        _ => JsonObject::new(),
    };
    schema.remove("$schema");
    schema.remove("title");

    if let Some(Value::Object(action)) = schema
        .get_mut("properties")
        .and_then(|props| props.get_mut("action"))
    {
        action.insert("enum".into(), json!(module.action_names()));
    }
    schema
}

#[cfg(test)]
mod tests;
