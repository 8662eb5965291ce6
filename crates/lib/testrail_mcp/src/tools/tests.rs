// @zen-component: MCP-ToolSurfaceTests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::catalog::Catalog;
    use crate::catalog::tests::fake_client;
    use crate::tools::{ToolMode, build_tools, describe_module, router_input_schema};

    fn catalog() -> Catalog {
        Catalog::build(&fake_client(&Arc::default()), "testrail")
    }

    #[test]
    fn routed_mode_registers_one_tool_per_module() {
        let tools = build_tools(&catalog(), ToolMode::Routed);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(names, vec!["testrail_cases", "testrail_projects"]);
    }

    #[test]
    fn per_operation_mode_registers_one_tool_per_operation() {
        let tools = build_tools(&catalog(), ToolMode::PerOperation);
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec![
                "testrail_cases_add_case",
                "testrail_cases_get_case",
                "testrail_projects_get_projects"
            ]
        );
        let add_case = &tools[0];
        assert_eq!(add_case.input_schema["required"], json!(["section_id", "title"]));
        assert!(
            add_case
                .description
                .as_deref()
                .is_some_and(|d| d.starts_with("Create a test case."))
        );
    }

    #[test]
    fn router_schema_has_exactly_action_and_params() {
        let catalog = catalog();
        let schema = router_input_schema(catalog.module("cases").expect("cases"));

        let props = schema["properties"].as_object().expect("properties");
        let mut keys: Vec<&str> = props.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["action", "params"]);
        assert_eq!(props["action"]["type"], "string");
        assert_eq!(props["action"]["enum"], json!(["add_case", "get_case"]));
        assert_eq!(schema["required"], json!(["action"]));
        assert!(schema.get("$schema").is_none());
    }

    #[test]
    fn router_description_lists_actions_with_summaries() {
        let catalog = catalog();
        let description = describe_module(catalog.module("cases").expect("cases"));
        assert!(description.starts_with("TestRail cases operations."));
        assert!(description.contains("- get_case(case_id: integer): Get a test case by ID."));
        assert!(description.contains("- add_case(section_id: integer, title: string, custom_fields?: object): Create a test case."));
        assert!(!description.contains("_helper"));
    }
}
