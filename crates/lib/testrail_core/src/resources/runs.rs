//! Test runs and the tests they contain.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*};
use crate::transport::HttpMethod::{Get, Post};

pub const RUNS: &[Endpoint] = &[
    Endpoint {
        name: "get_run",
        method: Get,
        path: "get_run/{run_id}",
        doc: Some("Get a test run by ID with its status counts."),
        params: &[id("run_id")],
    },
    Endpoint {
        name: "get_runs",
        method: Get,
        path: "get_runs/{project_id}",
        doc: Some("List the test runs of a project (runs inside plans are excluded)."),
        params: &[
            id("project_id"),
            filter("is_completed", Boolean),
            filter("milestone_id", Any),
            filter("suite_id", Any),
            filter("created_by", Any),
            LIMIT,
            OFFSET,
        ],
    },
    Endpoint {
        name: "add_run",
        method: Post,
        path: "add_run/{project_id}",
        doc: Some(
            "Create a test run.\n\nSet include_all=false and pass case_ids to run a custom selection.",
        ),
        params: &[
            id("project_id"),
            required_field("name", String),
            field("suite_id", Integer),
            field("description", String),
            field("milestone_id", Integer),
            field("assignedto_id", Integer),
            field("include_all", Boolean),
            field("case_ids", Array),
            field("refs", String),
        ],
    },
    Endpoint {
        name: "update_run",
        method: Post,
        path: "update_run/{run_id}",
        doc: Some("Update a test run."),
        params: &[
            id("run_id"),
            field("name", String),
            field("description", String),
            field("milestone_id", Integer),
            field("include_all", Boolean),
            field("case_ids", Array),
            field("refs", String),
        ],
    },
    Endpoint {
        name: "close_run",
        method: Post,
        path: "close_run/{run_id}",
        doc: Some("Close a test run and archive its tests and results. This cannot be undone."),
        params: &[id("run_id")],
    },
    Endpoint {
        name: "delete_run",
        method: Post,
        path: "delete_run/{run_id}",
        doc: Some("Delete a test run together with its tests and results."),
        params: &[id("run_id")],
    },
];

pub const TESTS: &[Endpoint] = &[
    Endpoint {
        name: "get_test",
        method: Get,
        path: "get_test/{test_id}",
        doc: Some("Get a test (a case instance inside a run) by ID."),
        params: &[id("test_id")],
    },
    Endpoint {
        name: "get_tests",
        method: Get,
        path: "get_tests/{run_id}",
        doc: Some(
            "List the tests of a run.\n\nstatus_id accepts a single ID or a list of IDs.",
        ),
        params: &[id("run_id"), filter("status_id", Any), LIMIT, OFFSET],
    },
    Endpoint {
        name: "update_test",
        method: Post,
        path: "update_test/{test_id}",
        doc: Some("Reassign a test or change its labels."),
        params: &[
            id("test_id"),
            field("assignedto_id", Integer),
            field("labels", Array),
        ],
    },
];
