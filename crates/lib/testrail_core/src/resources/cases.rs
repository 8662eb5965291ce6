//! Test cases and their metadata (fields, types, priorities, templates).
//!
//! `add_case` and `update_case` accept a `custom_fields` object whose entries
//! are sent as top-level `custom_*` body fields, the way TestRail expects
//! them.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*, ParamLocation, ParamSpec};
use crate::transport::HttpMethod::{Get, Post};

const CUSTOM_FIELDS: ParamSpec = ParamSpec::optional("custom_fields", Object, ParamLocation::BodyFields);

pub const CASES: &[Endpoint] = &[
    Endpoint {
        name: "get_case",
        method: Get,
        path: "get_case/{case_id}",
        doc: Some("Get a test case by ID, including its custom fields."),
        params: &[id("case_id")],
    },
    Endpoint {
        name: "get_cases",
        method: Get,
        path: "get_cases/{project_id}",
        doc: Some(
            "List test cases of a project.\n\nFilter by suite, section, or a title substring (filter).",
        ),
        params: &[
            id("project_id"),
            filter("suite_id", Integer),
            filter("section_id", Integer),
            filter("filter", String),
            filter("priority_id", Any),
            filter("type_id", Any),
            LIMIT.with_default("250"),
            OFFSET,
        ],
    },
    Endpoint {
        name: "get_history_for_case",
        method: Get,
        path: "get_history_for_case/{case_id}",
        doc: Some("Get the edit history of a test case."),
        params: &[id("case_id"), LIMIT, OFFSET],
    },
    Endpoint {
        name: "add_case",
        method: Post,
        path: "add_case/{section_id}",
        doc: Some(
            "Create a test case in a section.\n\n\
             Extra custom_* fields may be passed at the top level or inside custom_fields.",
        ),
        params: &[
            id("section_id"),
            required_field("title", String),
            field("template_id", Integer),
            field("type_id", Integer),
            field("priority_id", Integer),
            field("estimate", String),
            field("milestone_id", Integer),
            field("refs", String),
            field("description", String),
            field("preconditions", String),
            field("postconditions", String),
            CUSTOM_FIELDS,
        ],
    },
    Endpoint {
        name: "update_case",
        method: Post,
        path: "update_case/{case_id}",
        doc: Some(
            "Update a test case. Only supplied fields change.\n\n\
             Extra custom_* fields may be passed at the top level or inside custom_fields.",
        ),
        params: &[
            id("case_id"),
            field("section_id", Integer),
            field("title", String),
            field("template_id", Integer),
            field("type_id", Integer),
            field("priority_id", Integer),
            field("estimate", String),
            field("milestone_id", Integer),
            field("refs", String),
            field("description", String),
            field("preconditions", String),
            field("postconditions", String),
            CUSTOM_FIELDS,
        ],
    },
    Endpoint {
        name: "copy_cases_to_section",
        method: Post,
        path: "copy_cases_to_section/{section_id}",
        doc: Some("Copy test cases into a section."),
        params: &[id("section_id"), required_field("case_ids", Array)],
    },
    Endpoint {
        name: "move_cases_to_section",
        method: Post,
        path: "move_cases_to_section/{section_id}",
        doc: Some("Move test cases into a section of the given suite."),
        params: &[
            id("section_id"),
            required_field("suite_id", Integer),
            required_field("case_ids", Array),
        ],
    },
    Endpoint {
        name: "delete_case",
        method: Post,
        path: "delete_case/{case_id}",
        doc: Some("Delete a test case. Results recorded against it are lost."),
        params: &[id("case_id")],
    },
];

pub const CASE_FIELDS: &[Endpoint] = &[
    Endpoint {
        name: "get_case_fields",
        method: Get,
        path: "get_case_fields",
        doc: Some(
            "List the available test case fields.\n\nUse system_name values (custom_*) as custom field keys.",
        ),
        params: &[],
    },
    Endpoint {
        name: "add_case_field",
        method: Post,
        path: "add_case_field",
        doc: Some("Create a custom test case field."),
        params: &[
            required_field("type", String),
            required_field("name", String),
            required_field("label", String),
            required_field("configs", Array),
            field("description", String),
            field("include_all", Boolean),
            field("template_ids", Array),
        ],
    },
];

pub const CASE_TYPES: &[Endpoint] = &[Endpoint {
    name: "get_case_types",
    method: Get,
    path: "get_case_types",
    doc: Some("List the available test case types."),
    params: &[],
}];

pub const PRIORITIES: &[Endpoint] = &[Endpoint {
    name: "get_priorities",
    method: Get,
    path: "get_priorities",
    doc: Some("List the available priorities."),
    params: &[],
}];

pub const TEMPLATES: &[Endpoint] = &[Endpoint {
    name: "get_templates",
    method: Get,
    path: "get_templates/{project_id}",
    doc: Some("List the field templates available to a project."),
    params: &[id("project_id")],
}];
