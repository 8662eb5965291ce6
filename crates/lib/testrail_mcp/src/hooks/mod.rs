// @zen-component: MCP-HookPipeline
//
//! Hook pipeline around every dispatched TestRail action.
//!
//! Hooks run before and after each action and can inspect, transform or
//! reject it. Built-in hooks provide audit logging and a read-only guard.

pub mod audit;
pub mod read_only;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

/// Context passed to hooks for one action dispatch.
#[derive(Debug, Clone)]
pub struct HookContext {
    pub invocation_id: Uuid,
    /// Tool name the caller used, in either naming scheme.
    pub tool_name: String,
    pub module: String,
    pub action: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub started: Instant,
}

impl HookContext {
    pub fn new(invocation_id: Uuid, tool_name: &str, module: &str, action: &str) -> Self {
        Self {
            invocation_id,
            tool_name: tool_name.to_string(),
            module: module.to_string(),
            action: action.to_string(),
            timestamp: chrono::Utc::now(),
            started: Instant::now(),
        }
    }
}

/// Scope at which a hook applies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookScope {
    Global,
    Module(String),
    Action(String, String),
}

/// Outcome of an action, passed to after_call hooks.
#[derive(Debug, Clone)]
pub enum ToolCallOutcome {
    Success(serde_json::Value),
    Error(String),
}

/// Errors that can occur in hooks.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Hook error: {0}")]
    Internal(String),
}

/// Hook trait for custom per-dispatch logic.
///
/// `before_call` runs in pipeline order; `after_call` runs in reverse order.
#[async_trait]
pub trait ToolHook: Send + Sync {
    /// Called before the action runs. Return Err to reject it.
    async fn before_call(
        &self,
        ctx: &HookContext,
        params: &mut serde_json::Value,
    ) -> Result<(), HookError>;

    /// Called after the action ran. Can inspect or transform the outcome.
    async fn after_call(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError>;

    fn name(&self) -> &str;
}

/// Ordered pipeline of scoped hooks.
pub struct HookPipeline {
    hooks: Vec<(HookScope, Arc<dyn ToolHook>)>,
}

impl HookPipeline {
    pub fn new(hooks: Vec<(HookScope, Arc<dyn ToolHook>)>) -> Self {
        Self { hooks }
    }

    pub fn empty() -> Self {
        Self { hooks: Vec::new() }
    }

    /// Run all before_call hooks in order. Short-circuits on error.
    pub async fn run_before(
        &self,
        ctx: &HookContext,
        params: &mut serde_json::Value,
    ) -> Result<(), HookError> {
        for (scope, hook) in &self.hooks {
            if scope_matches(scope, ctx) {
                hook.before_call(ctx, params).await?;
            }
        }
        Ok(())
    }

    /// Run all after_call hooks in reverse order.
    pub async fn run_after(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError> {
        for (scope, hook) in self.hooks.iter().rev() {
            if scope_matches(scope, ctx) {
                hook.after_call(ctx, outcome).await?;
            }
        }
        Ok(())
    }
}

fn scope_matches(scope: &HookScope, ctx: &HookContext) -> bool {
    match scope {
        HookScope::Global => true,
        HookScope::Module(module) => ctx.module == *module,
        HookScope::Action(module, action) => ctx.module == *module && ctx.action == *action,
    }
}

/// Build the default pipeline.
///
/// Pipeline order: AuditHook, then ReadOnlyHook when `read_only` is set.
pub fn default_pipeline(read_only: bool) -> HookPipeline {
    let mut hooks: Vec<(HookScope, Arc<dyn ToolHook>)> =
        vec![(HookScope::Global, Arc::new(audit::AuditHook))];
    if read_only {
        hooks.push((HookScope::Global, Arc::new(read_only::ReadOnlyHook::default())));
    }
    HookPipeline::new(hooks)
}

#[cfg(test)]
mod tests;
