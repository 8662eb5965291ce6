// @zen-component: MCP-HookTests

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use uuid::Uuid;

    use crate::hooks::read_only::ReadOnlyHook;
    use crate::hooks::{
        HookContext, HookError, HookPipeline, HookScope, ToolCallOutcome, ToolHook,
        default_pipeline,
    };

    /// Test hook that records call order.
    struct OrderTracker {
        name: String,
        before_counter: Arc<AtomicU32>,
        before_order: Arc<Mutex<Vec<String>>>,
        after_order: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ToolHook for OrderTracker {
        async fn before_call(
            &self,
            _ctx: &HookContext,
            _params: &mut serde_json::Value,
        ) -> Result<(), HookError> {
            self.before_counter.fetch_add(1, Ordering::SeqCst);
            self.before_order.lock().unwrap().push(self.name.clone());
            Ok(())
        }

        async fn after_call(
            &self,
            _ctx: &HookContext,
            _outcome: &mut ToolCallOutcome,
        ) -> Result<(), HookError> {
            self.after_order.lock().unwrap().push(self.name.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    /// Test hook that rejects in before_call.
    struct RejectHook;

    #[async_trait]
    impl ToolHook for RejectHook {
        async fn before_call(
            &self,
            _ctx: &HookContext,
            _params: &mut serde_json::Value,
        ) -> Result<(), HookError> {
            Err(HookError::AccessDenied("rejected".into()))
        }

        async fn after_call(
            &self,
            _ctx: &HookContext,
            _outcome: &mut ToolCallOutcome,
        ) -> Result<(), HookError> {
            Ok(())
        }

        fn name(&self) -> &str {
            "RejectHook"
        }
    }

    struct Recorder {
        before: Arc<Mutex<Vec<String>>>,
        after: Arc<Mutex<Vec<String>>>,
        counter: Arc<AtomicU32>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                before: Arc::default(),
                after: Arc::default(),
                counter: Arc::default(),
            }
        }

        fn hook(&self, name: &str) -> Arc<dyn ToolHook> {
            Arc::new(OrderTracker {
                name: name.into(),
                before_counter: self.counter.clone(),
                before_order: self.before.clone(),
                after_order: self.after.clone(),
            })
        }
    }

    fn make_ctx(module: &str, action: &str) -> HookContext {
        HookContext::new(Uuid::new_v4(), "testrail_cases", module, action)
    }

    #[tokio::test]
    async fn pipeline_before_call_order() {
        let rec = Recorder::new();
        let pipeline = HookPipeline::new(vec![
            (HookScope::Global, rec.hook("A")),
            (HookScope::Global, rec.hook("B")),
        ]);
        let mut params = serde_json::json!({});

        pipeline
            .run_before(&make_ctx("cases", "get_case"), &mut params)
            .await
            .unwrap();

        assert_eq!(*rec.before.lock().unwrap(), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn pipeline_after_call_reverse_order() {
        let rec = Recorder::new();
        let pipeline = HookPipeline::new(vec![
            (HookScope::Global, rec.hook("A")),
            (HookScope::Global, rec.hook("B")),
        ]);
        let mut outcome = ToolCallOutcome::Success(serde_json::json!({}));

        pipeline
            .run_after(&make_ctx("cases", "get_case"), &mut outcome)
            .await
            .unwrap();

        assert_eq!(*rec.after.lock().unwrap(), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn pipeline_short_circuits_on_error() {
        let rec = Recorder::new();
        let pipeline = HookPipeline::new(vec![
            (HookScope::Global, Arc::new(RejectHook)),
            (HookScope::Global, rec.hook("B")),
        ]);
        let mut params = serde_json::json!({});

        let result = pipeline
            .run_before(&make_ctx("cases", "get_case"), &mut params)
            .await;

        assert!(matches!(result, Err(HookError::AccessDenied(_))));
        assert_eq!(rec.counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_pipeline_is_noop() {
        let pipeline = HookPipeline::empty();
        let ctx = make_ctx("cases", "get_case");
        let mut params = serde_json::json!({});
        let mut outcome = ToolCallOutcome::Success(serde_json::json!({}));

        pipeline.run_before(&ctx, &mut params).await.unwrap();
        pipeline.run_after(&ctx, &mut outcome).await.unwrap();
    }

    #[tokio::test]
    async fn scope_filtering() {
        let rec = Recorder::new();
        let pipeline = HookPipeline::new(vec![
            (HookScope::Global, rec.hook("global")),
            (HookScope::Module("runs".into()), rec.hook("runs")),
            (
                HookScope::Action("runs".into(), "close_run".into()),
                rec.hook("close_run"),
            ),
        ]);
        let mut params = serde_json::json!({});

        pipeline
            .run_before(&make_ctx("cases", "get_case"), &mut params)
            .await
            .unwrap();
        assert_eq!(*rec.before.lock().unwrap(), vec!["global"]);
        rec.before.lock().unwrap().clear();

        pipeline
            .run_before(&make_ctx("runs", "get_run"), &mut params)
            .await
            .unwrap();
        assert_eq!(*rec.before.lock().unwrap(), vec!["global", "runs"]);
        rec.before.lock().unwrap().clear();

        pipeline
            .run_before(&make_ctx("runs", "close_run"), &mut params)
            .await
            .unwrap();
        assert_eq!(
            *rec.before.lock().unwrap(),
            vec!["global", "runs", "close_run"]
        );
    }

    #[test]
    fn read_only_recognizes_mutating_actions() {
        let hook = ReadOnlyHook::default();
        for action in ["add_case", "update_run", "delete_section", "close_plan", "copy_cases_to_section", "move_cases_to_section"] {
            assert!(hook.is_mutating(action), "{action} should be mutating");
        }
        for action in ["get_case", "get_runs", "get_current_user"] {
            assert!(!hook.is_mutating(action), "{action} should be read-only");
        }
    }

    #[tokio::test]
    async fn read_only_rejects_writes_and_allows_reads() {
        let hook = ReadOnlyHook::default();
        let mut params = serde_json::json!({});

        let err = hook
            .before_call(&make_ctx("cases", "add_case"), &mut params)
            .await
            .expect_err("write must be rejected");
        assert!(err.to_string().contains("cases.add_case"));

        hook.before_call(&make_ctx("cases", "get_case"), &mut params)
            .await
            .expect("read allowed");
    }

    #[tokio::test]
    async fn default_pipeline_adds_read_only_guard_on_request() {
        let ctx = make_ctx("cases", "add_case");

        let mut params = serde_json::json!({});
        default_pipeline(false)
            .run_before(&ctx, &mut params)
            .await
            .expect("writes allowed");

        let err = default_pipeline(true)
            .run_before(&ctx, &mut params)
            .await
            .expect_err("writes rejected");
        assert!(matches!(err, HookError::AccessDenied(_)));
    }
}
