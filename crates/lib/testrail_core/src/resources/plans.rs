//! Test plans and plan entries.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*, ParamLocation, ParamSpec};
use crate::transport::HttpMethod::{Get, Post};

/// Plan entry IDs are GUID strings, not integers.
const ENTRY_ID: ParamSpec = ParamSpec::required("entry_id", String, ParamLocation::Path);

pub const PLANS: &[Endpoint] = &[
    Endpoint {
        name: "get_plan",
        method: Get,
        path: "get_plan/{plan_id}",
        doc: Some("Get a test plan by ID, including its entries and runs."),
        params: &[id("plan_id")],
    },
    Endpoint {
        name: "get_plans",
        method: Get,
        path: "get_plans/{project_id}",
        doc: Some("List the test plans of a project."),
        params: &[
            id("project_id"),
            filter("is_completed", Boolean),
            filter("milestone_id", Any),
            filter("created_by", Any),
            LIMIT,
            OFFSET,
        ],
    },
    Endpoint {
        name: "add_plan",
        method: Post,
        path: "add_plan/{project_id}",
        doc: Some("Create a test plan, optionally with initial entries."),
        params: &[
            id("project_id"),
            required_field("name", String),
            field("description", String),
            field("milestone_id", Integer),
            field("entries", Array),
        ],
    },
    Endpoint {
        name: "add_plan_entry",
        method: Post,
        path: "add_plan_entry/{plan_id}",
        doc: Some("Add a suite (one or more runs) to a test plan."),
        params: &[
            id("plan_id"),
            required_field("suite_id", Integer),
            field("name", String),
            field("description", String),
            field("assignedto_id", Integer),
            field("include_all", Boolean),
            field("case_ids", Array),
            field("config_ids", Array),
            field("runs", Array),
        ],
    },
    Endpoint {
        name: "update_plan",
        method: Post,
        path: "update_plan/{plan_id}",
        doc: Some("Update a test plan."),
        params: &[
            id("plan_id"),
            field("name", String),
            field("description", String),
            field("milestone_id", Integer),
        ],
    },
    Endpoint {
        name: "update_plan_entry",
        method: Post,
        path: "update_plan_entry/{plan_id}/{entry_id}",
        doc: Some("Update the runs of a plan entry."),
        params: &[
            id("plan_id"),
            ENTRY_ID,
            field("name", String),
            field("description", String),
            field("assignedto_id", Integer),
            field("include_all", Boolean),
            field("case_ids", Array),
        ],
    },
    Endpoint {
        name: "delete_plan_entry",
        method: Post,
        path: "delete_plan_entry/{plan_id}/{entry_id}",
        doc: Some("Remove an entry and its runs from a test plan."),
        params: &[id("plan_id"), ENTRY_ID],
    },
    Endpoint {
        name: "close_plan",
        method: Post,
        path: "close_plan/{plan_id}",
        doc: Some("Close a test plan and archive its runs. This cannot be undone."),
        params: &[id("plan_id")],
    },
    Endpoint {
        name: "delete_plan",
        method: Post,
        path: "delete_plan/{plan_id}",
        doc: Some("Delete a test plan together with its runs and results."),
        params: &[id("plan_id")],
    },
];
