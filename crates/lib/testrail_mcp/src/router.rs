// @zen-component: MCP-ModuleRouter
//
//! Action dispatch shared by both tool surfaces.
//!
//! A routed tool call `(module, action, params)` and a per-operation tool
//! call end up in [`Dispatcher::dispatch`], which resolves the action,
//! reshapes parameters, runs the `before_call` hooks, checks required
//! parameters and invokes the bound operation.

use std::sync::Arc;

use serde_json::{Map, Value};
use testrail_core::{ApiError, ArgumentError, InvokeError};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::catalog::{Catalog, OperationDescriptor, ToolTarget};
use crate::hooks::{HookContext, HookError, HookPipeline, ToolCallOutcome};
use crate::reshape::ReshapePolicy;
use crate::tools::types::RouterRequest;

/// One requested action. `id` correlates the log lines of a dispatch.
#[derive(Debug, Clone)]
pub struct ActionInvocation {
    pub id: Uuid,
    pub tool_name: String,
    pub module: String,
    pub action: String,
    pub params: Map<String, Value>,
}

impl ActionInvocation {
    pub fn new(
        tool_name: impl Into<String>,
        module: impl Into<String>,
        action: impl Into<String>,
        params: Map<String, Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool_name: tool_name.into(),
            module: module.into(),
            action: action.into(),
            params,
        }
    }
}

/// Why a dispatch failed.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unknown module: {0}")]
    UnknownModule(String),

    #[error("Invalid arguments for {tool}: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("Invalid action '{action}' for module '{module}'. Valid actions: {}", .valid.join(", "))]
    InvalidAction {
        module: String,
        action: String,
        valid: Vec<String>,
    },

    #[error("Missing required parameter(s) for {module}.{action}: {}", .missing.join(", "))]
    MissingParameters {
        module: String,
        action: String,
        missing: Vec<String>,
    },

    #[error("Invalid parameters for {module}.{action}: {message}")]
    InvalidParameters {
        module: String,
        action: String,
        message: String,
        required: Vec<String>,
    },

    #[error(transparent)]
    Rejected(#[from] HookError),

    #[error(transparent)]
    Upstream(#[from] ApiError),
}

/// Resolves and runs actions against one catalog.
pub struct Dispatcher {
    catalog: Arc<Catalog>,
    hooks: Arc<HookPipeline>,
    reshape: ReshapePolicy,
}

impl Dispatcher {
    pub fn new(catalog: Arc<Catalog>, hooks: Arc<HookPipeline>) -> Self {
        Self {
            catalog,
            hooks,
            reshape: ReshapePolicy::default(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Run a tool call addressed by either naming scheme.
    ///
    /// Routed tools take `{action, params}`; absent or null `params` is an
    /// empty object. Per-operation tools take the operation's arguments
    /// directly.
    pub async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Option<Map<String, Value>>,
    ) -> Result<Value, DispatchError> {
        let target = self
            .catalog
            .resolve_tool(tool_name)
            .ok_or_else(|| DispatchError::UnknownTool(tool_name.to_string()))?;

        let invocation = match target {
            ToolTarget::Router { module } => {
                let request: RouterRequest =
                    serde_json::from_value(Value::Object(arguments.unwrap_or_default())).map_err(
                        |e| DispatchError::InvalidArguments {
                            tool: tool_name.to_string(),
                            message: e.to_string(),
                        },
                    )?;
                ActionInvocation::new(
                    tool_name,
                    module.as_str(),
                    request.action,
                    request.params.unwrap_or_default(),
                )
            }
            ToolTarget::Operation { module, action } => ActionInvocation::new(
                tool_name,
                module.as_str(),
                action.as_str(),
                arguments.unwrap_or_default(),
            ),
        };

        self.dispatch(invocation).await
    }

    /// Resolve, validate and invoke one action.
    pub async fn dispatch(&self, invocation: ActionInvocation) -> Result<Value, DispatchError> {
        let ActionInvocation {
            id,
            tool_name,
            module,
            action,
            params,
        } = invocation;

        let descriptor = self
            .catalog
            .module(&module)
            .ok_or_else(|| DispatchError::UnknownModule(module.clone()))?;
        let operation =
            descriptor
                .operation(&action)
                .ok_or_else(|| DispatchError::InvalidAction {
                    module: module.clone(),
                    action: action.clone(),
                    valid: descriptor.action_names(),
                })?;

        let known: Vec<&str> = operation.signature.names().collect();
        let params = self.reshape.apply(&module, &action, &known, params);

        let ctx = HookContext::new(id, &tool_name, &module, &action);
        let mut hooked = Value::Object(params);
        self.hooks.run_before(&ctx, &mut hooked).await?;
        let Value::Object(params) = hooked else {
            return Err(HookError::Internal("hook replaced parameters with a non-object".into()).into());
        };

        let result = run_operation(id, &module, &action, operation, params).await;

        let mut outcome = match &result {
            Ok(value) => ToolCallOutcome::Success(value.clone()),
            Err(e) => ToolCallOutcome::Error(e.to_string()),
        };
        if let Err(e) = self.hooks.run_after(&ctx, &mut outcome).await {
            warn!(invocation_id = %id, error = %e, "after_call hook failed");
        }

        result
    }
}

/// Check required parameters, invoke, and classify failures.
async fn run_operation(
    id: Uuid,
    module: &str,
    action: &str,
    operation: &OperationDescriptor,
    params: Map<String, Value>,
) -> Result<Value, DispatchError> {
    let missing: Vec<String> = operation
        .signature
        .required()
        .into_iter()
        .filter(|name| params.get(*name).is_none_or(Value::is_null))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(DispatchError::MissingParameters {
            module: module.to_string(),
            action: action.to_string(),
            missing,
        });
    }

    match operation.invoke(params.clone()).await {
        Ok(value) => Ok(value),
        Err(InvokeError::Arguments(ArgumentError::Missing(missing))) => {
            Err(DispatchError::MissingParameters {
                module: module.to_string(),
                action: action.to_string(),
                missing,
            })
        }
        Err(InvokeError::Arguments(e)) => Err(DispatchError::InvalidParameters {
            module: module.to_string(),
            action: action.to_string(),
            message: e.to_string(),
            required: operation
                .signature
                .required()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }),
        Err(InvokeError::Api(e)) => {
            let params = serde_json::Value::Object(params);
            error!(
                invocation_id = %id,
                module = %module,
                action = %action,
                params = %params,
                kind = e.kind(),
                error = %e,
                "TestRail operation failed"
            );
            Err(DispatchError::Upstream(e))
        }
    }
}
