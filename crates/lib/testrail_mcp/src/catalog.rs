// @zen-component: MCP-OperationCatalog
//
//! Operation catalog built once from a client's modules.
//!
//! The catalog is the single source for both tool-surface shapes: routed
//! tools resolve `(module, action)` through it and per-operation tools are
//! generated from the same descriptors.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{Map, Value};
use testrail_core::{ApiClient, BoundOperation, Invoke, InvokeError};
use tracing::{debug, warn};

use crate::identity::{self, Signature};

/// Prefix marking an operation as private.
pub const PRIVATE_PREFIX: &str = "_";

/// Transport helpers that are never exposed as operations.
pub const INFRASTRUCTURE_OPERATIONS: &[&str] = &[
    "get",
    "post",
    "put",
    "delete",
    "patch",
    "request",
    "build_url",
    "auth",
    "handle_response",
];

/// Whether an operation name may appear in the catalog.
pub fn is_public_operation(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(PRIVATE_PREFIX)
        && !INFRASTRUCTURE_OPERATIONS.contains(&name)
}

/// One callable operation with its derived metadata.
#[derive(Clone)]
pub struct OperationDescriptor {
    pub name: String,
    pub summary: String,
    pub signature: Signature,
    invoker: Arc<dyn Invoke>,
}

impl OperationDescriptor {
    pub fn from_bound(op: BoundOperation) -> Self {
        Self {
            summary: identity::summarize(op.doc.as_deref()),
            signature: Signature::from_params(&op.params),
            name: op.name,
            invoker: op.invoker,
        }
    }

    pub async fn invoke(&self, args: Map<String, Value>) -> Result<Value, InvokeError> {
        self.invoker.invoke(args).await
    }
}

impl std::fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

/// The public operations of one module, keyed by name.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub module_name: String,
    pub operations: BTreeMap<String, OperationDescriptor>,
}

impl ModuleDescriptor {
    pub fn operation(&self, name: &str) -> Option<&OperationDescriptor> {
        self.operations.get(name)
    }

    /// Sorted action names.
    pub fn action_names(&self) -> Vec<String> {
        self.operations.keys().cloned().collect()
    }
}

/// What a tool name refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolTarget {
    /// A module's routed entry point.
    Router { module: String },
    /// One operation addressed directly.
    Operation { module: String, action: String },
}

/// Catalog of every enumerable module of a client.
#[derive(Debug, Clone)]
pub struct Catalog {
    namespace: String,
    modules: BTreeMap<String, ModuleDescriptor>,
    tool_index: HashMap<String, ToolTarget>,
}

impl Catalog {
    /// Enumerate every module of `client`.
    ///
    /// Absent modules are skipped. A module whose enumeration fails is
    /// skipped with a warning and does not prevent the others from loading.
    pub fn build(client: &dyn ApiClient, namespace: &str) -> Self {
        let mut modules = BTreeMap::new();

        for &name in client.module_names() {
            let Some(module) = client.module(name) else {
                debug!(module = name, "module not present on client, skipping");
                continue;
            };

            let ops = match module.operations() {
                Ok(ops) => ops,
                Err(e) => {
                    warn!(module = name, error = %e, "failed to enumerate module operations, skipping");
                    continue;
                }
            };

            let operations: BTreeMap<String, OperationDescriptor> = ops
                .into_iter()
                .filter(|op| is_public_operation(&op.name))
                .map(|op| (op.name.clone(), OperationDescriptor::from_bound(op)))
                .collect();

            if operations.is_empty() {
                debug!(module = name, "module has no public operations, skipping");
                continue;
            }

            modules.insert(
                name.to_string(),
                ModuleDescriptor {
                    module_name: name.to_string(),
                    operations,
                },
            );
        }

        let tool_index = index_tool_names(namespace, &modules);
        debug!(
            namespace,
            modules = modules.len(),
            tools = tool_index.len(),
            "operation catalog built"
        );

        Self {
            namespace: namespace.to_string(),
            modules,
            tool_index,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.values()
    }

    pub fn module(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.modules.get(name)
    }

    pub fn operation_count(&self) -> usize {
        self.modules.values().map(|m| m.operations.len()).sum()
    }

    /// Resolve a tool name of either naming scheme.
    pub fn resolve_tool(&self, tool_name: &str) -> Option<&ToolTarget> {
        self.tool_index.get(tool_name)
    }
}

fn index_tool_names(
    namespace: &str,
    modules: &BTreeMap<String, ModuleDescriptor>,
) -> HashMap<String, ToolTarget> {
    let mut index = HashMap::new();
    let mut insert = |name: String, target: ToolTarget| {
        if let Some(previous) = index.insert(name.clone(), target) {
            warn!(tool = %name, ?previous, "tool name collision, later registration wins");
        }
    };

    for module in modules.values() {
        insert(
            identity::router_tool_name(namespace, &module.module_name),
            ToolTarget::Router {
                module: module.module_name.clone(),
            },
        );
        for action in module.operations.keys() {
            insert(
                identity::operation_tool_name(namespace, &module.module_name, action),
                ToolTarget::Operation {
                    module: module.module_name.clone(),
                    action: action.clone(),
                },
            );
        }
    }
    index
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use serde_json::{Map, Value, json};
    use testrail_core::{
        ApiClient, ApiModule, BoundOperation, EnumerationError, Invoke, InvokeError, ParamKind,
        ParamLocation, ParamSpec,
    };

    use super::*;

    /// Records every invocation and answers with a fixed result.
    pub(crate) struct RecordingInvoker {
        pub name: &'static str,
        pub calls: Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
        pub reply: Result<Value, fn() -> InvokeError>,
    }

    #[async_trait]
    impl Invoke for RecordingInvoker {
        async fn invoke(&self, args: Map<String, Value>) -> Result<Value, InvokeError> {
            self.calls.lock().unwrap().push((self.name.to_string(), args));
            match &self.reply {
                Ok(v) => Ok(v.clone()),
                Err(make) => Err(make()),
            }
        }
    }

    pub(crate) struct FakeModule {
        pub ops: Vec<BoundOperation>,
        pub fail: bool,
    }

    impl ApiModule for FakeModule {
        fn operations(&self) -> Result<Vec<BoundOperation>, EnumerationError> {
            if self.fail {
                return Err(EnumerationError::DuplicateOperation("broken".into()));
            }
            Ok(self.ops.clone())
        }
    }

    pub(crate) struct FakeClient {
        pub names: Vec<&'static str>,
        pub modules: BTreeMap<&'static str, FakeModule>,
    }

    impl ApiClient for FakeClient {
        fn module_names(&self) -> &[&'static str] {
            &self.names
        }

        fn module(&self, name: &str) -> Option<&dyn ApiModule> {
            self.modules.get(name).map(|m| m as &dyn ApiModule)
        }
    }

    pub(crate) const GET_CASE_PARAMS: &[ParamSpec] =
        &[ParamSpec::required("case_id", ParamKind::Integer, ParamLocation::Path)];
    pub(crate) const ADD_CASE_PARAMS: &[ParamSpec] = &[
        ParamSpec::required("section_id", ParamKind::Integer, ParamLocation::Path),
        ParamSpec::required("title", ParamKind::String, ParamLocation::Body),
        ParamSpec::optional("custom_fields", ParamKind::Object, ParamLocation::BodyFields),
    ];

    pub(crate) fn op(
        name: &'static str,
        doc: Option<&str>,
        params: &[ParamSpec],
        calls: &Arc<Mutex<Vec<(String, Map<String, Value>)>>>,
        reply: Result<Value, fn() -> InvokeError>,
    ) -> BoundOperation {
        BoundOperation {
            name: name.to_string(),
            doc: doc.map(str::to_string),
            params: params.to_vec(),
            invoker: Arc::new(RecordingInvoker {
                name,
                calls: calls.clone(),
                reply,
            }),
        }
    }

    /// A client with `cases` and `projects`, an absent `users` and a broken `runs`.
    pub(crate) fn fake_client(calls: &Arc<Mutex<Vec<(String, Map<String, Value>)>>>) -> FakeClient {
        let cases = FakeModule {
            ops: vec![
                op(
                    "get_case",
                    Some("Get a test case by ID.\n\nReturns the case."),
                    GET_CASE_PARAMS,
                    calls,
                    Ok(json!({"id": 1})),
                ),
                op("add_case", Some("Create a test case."), ADD_CASE_PARAMS, calls, Ok(json!({"id": 2}))),
                op("_helper", None, &[], calls, Ok(Value::Null)),
                op("request", None, &[], calls, Ok(Value::Null)),
            ],
            fail: false,
        };
        let projects = FakeModule {
            ops: vec![op("get_projects", None, &[], calls, Ok(json!([])))],
            fail: false,
        };
        let runs = FakeModule {
            ops: vec![],
            fail: true,
        };

        FakeClient {
            names: vec!["projects", "cases", "users", "runs"],
            modules: BTreeMap::from([("cases", cases), ("projects", projects), ("runs", runs)]),
        }
    }

    #[test]
    fn public_operation_filter() {
        assert!(is_public_operation("get_case"));
        assert!(!is_public_operation("_private"));
        assert!(!is_public_operation("request"));
        assert!(!is_public_operation("handle_response"));
        assert!(!is_public_operation(""));
    }

    #[test]
    fn build_skips_absent_broken_and_private() {
        let calls = Arc::default();
        let catalog = Catalog::build(&fake_client(&calls), "testrail");

        let names: Vec<&str> = catalog.modules().map(|m| m.module_name.as_str()).collect();
        assert_eq!(names, vec!["cases", "projects"]);

        let cases = catalog.module("cases").expect("cases");
        assert_eq!(cases.action_names(), vec!["add_case", "get_case"]);
        assert_eq!(catalog.operation_count(), 3);
    }

    #[test]
    fn descriptors_carry_summary_and_signature() {
        let calls = Arc::default();
        let catalog = Catalog::build(&fake_client(&calls), "testrail");
        let get_case = catalog.module("cases").and_then(|m| m.operation("get_case")).expect("op");
        assert_eq!(get_case.summary, "Get a test case by ID.");
        assert_eq!(get_case.signature.to_string(), "(case_id: integer)");

        let projects = catalog.module("projects").and_then(|m| m.operation("get_projects")).expect("op");
        assert_eq!(projects.summary, "");
    }

    #[test]
    fn both_naming_schemes_resolve() {
        let calls = Arc::default();
        let catalog = Catalog::build(&fake_client(&calls), "testrail");

        assert_eq!(
            catalog.resolve_tool("testrail_cases"),
            Some(&ToolTarget::Router { module: "cases".into() })
        );
        assert_eq!(
            catalog.resolve_tool("testrail_cases_get_case"),
            Some(&ToolTarget::Operation {
                module: "cases".into(),
                action: "get_case".into()
            })
        );
        assert_eq!(catalog.resolve_tool("testrail_runs"), None);
        assert_eq!(catalog.resolve_tool("testrail_cases__helper"), None);
        assert_eq!(catalog.resolve_tool("other_cases"), None);
    }

    #[test]
    fn real_client_catalog_covers_every_module() {
        let config = testrail_core::ClientConfig::new("https://acme.testrail.io", "qa@acme.io", "k")
            .expect("config");
        let client = testrail_core::TestRailClient::new(&config).expect("client");
        let catalog = Catalog::build(&client, "testrail");

        let names: Vec<&str> = catalog.modules().map(|m| m.module_name.as_str()).collect();
        for module in client.module_names() {
            assert!(names.contains(module), "missing module {module}");
        }
        assert!(catalog.resolve_tool("testrail_case_fields_get_case_fields").is_some());
        assert!(catalog.resolve_tool("testrail_cases_add_case").is_some());
    }
}
