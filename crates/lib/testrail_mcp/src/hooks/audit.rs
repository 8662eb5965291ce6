// @zen-component: MCP-AuditHook
//
//! Audit hook: one structured log line per dispatched action.

use async_trait::async_trait;
use tracing::{debug, info};

use super::{HookContext, HookError, ToolCallOutcome, ToolHook};

/// Logs every action under the `testrail_mcp::audit` target.
pub struct AuditHook;

#[async_trait]
impl ToolHook for AuditHook {
    async fn before_call(
        &self,
        ctx: &HookContext,
        _params: &mut serde_json::Value,
    ) -> Result<(), HookError> {
        debug!(
            target: "testrail_mcp::audit",
            invocation_id = %ctx.invocation_id,
            tool = %ctx.tool_name,
            module = %ctx.module,
            action = %ctx.action,
            "action started"
        );
        Ok(())
    }

    async fn after_call(
        &self,
        ctx: &HookContext,
        outcome: &mut ToolCallOutcome,
    ) -> Result<(), HookError> {
        let success = matches!(outcome, ToolCallOutcome::Success(_));
        info!(
            target: "testrail_mcp::audit",
            invocation_id = %ctx.invocation_id,
            tool = %ctx.tool_name,
            module = %ctx.module,
            action = %ctx.action,
            success,
            elapsed_ms = ctx.started.elapsed().as_millis() as u64,
            at = %ctx.timestamp.to_rfc3339(),
            "action completed"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "AuditHook"
    }
}
