// @zen-component: MCP-ReadOnlyHook
//
//! Read-only guard: rejects actions that would modify TestRail data.

use async_trait::async_trait;

use super::{HookContext, HookError, ToolCallOutcome, ToolHook};

/// Action-name prefixes of TestRail's mutating endpoints.
pub const MUTATING_PREFIXES: &[&str] = &["add_", "update_", "delete_", "close_", "copy_", "move_", "run_"];

/// Blocks every action whose name starts with a mutating prefix.
pub struct ReadOnlyHook {
    prefixes: &'static [&'static str],
}

impl Default for ReadOnlyHook {
    fn default() -> Self {
        Self {
            prefixes: MUTATING_PREFIXES,
        }
    }
}

impl ReadOnlyHook {
    pub fn is_mutating(&self, action: &str) -> bool {
        self.prefixes.iter().any(|p| action.starts_with(p))
    }
}

#[async_trait]
impl ToolHook for ReadOnlyHook {
    async fn before_call(
        &self,
        ctx: &HookContext,
        _params: &mut serde_json::Value,
    ) -> Result<(), HookError> {
        if self.is_mutating(&ctx.action) {
            return Err(HookError::AccessDenied(format!(
                "{}.{} modifies TestRail data and the server is read-only",
                ctx.module, ctx.action
            )));
        }
        Ok(())
    }

    async fn after_call(
        &self,
        _ctx: &HookContext,
        _outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError> {
        Ok(())
    }

    fn name(&self) -> &str {
        "ReadOnlyHook"
    }
}
