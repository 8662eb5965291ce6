//! Test results, result fields and statuses.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*, ParamSpec};
use crate::transport::HttpMethod::{Get, Post};

/// Fields shared by the single-result `add_*` endpoints.
const STATUS_ID: ParamSpec = field("status_id", Integer);
const COMMENT: ParamSpec = field("comment", String);
const VERSION: ParamSpec = field("version", String);
const ELAPSED: ParamSpec = field("elapsed", String);
const DEFECTS: ParamSpec = field("defects", String);
const ASSIGNEDTO_ID: ParamSpec = field("assignedto_id", Integer);

pub const RESULTS: &[Endpoint] = &[
    Endpoint {
        name: "get_results",
        method: Get,
        path: "get_results/{test_id}",
        doc: Some("List the results recorded for a test, newest first."),
        params: &[id("test_id"), filter("status_id", Any), LIMIT, OFFSET],
    },
    Endpoint {
        name: "get_results_for_case",
        method: Get,
        path: "get_results_for_case/{run_id}/{case_id}",
        doc: Some("List the results for a case within a run."),
        params: &[
            id("run_id"),
            id("case_id"),
            filter("status_id", Any),
            LIMIT,
            OFFSET,
        ],
    },
    Endpoint {
        name: "get_results_for_run",
        method: Get,
        path: "get_results_for_run/{run_id}",
        doc: Some("List all results recorded in a run."),
        params: &[
            id("run_id"),
            filter("status_id", Any),
            filter("created_after", Integer),
            filter("created_before", Integer),
            LIMIT,
            OFFSET,
        ],
    },
    Endpoint {
        name: "add_result",
        method: Post,
        path: "add_result/{test_id}",
        doc: Some(
            "Record a result for a test.\n\nstatus_id: 1 passed, 2 blocked, 3 untested, 4 retest, 5 failed.",
        ),
        params: &[
            id("test_id"),
            STATUS_ID,
            COMMENT,
            VERSION,
            ELAPSED,
            DEFECTS,
            ASSIGNEDTO_ID,
        ],
    },
    Endpoint {
        name: "add_result_for_case",
        method: Post,
        path: "add_result_for_case/{run_id}/{case_id}",
        doc: Some("Record a result for a case within a run."),
        params: &[
            id("run_id"),
            id("case_id"),
            STATUS_ID,
            COMMENT,
            VERSION,
            ELAPSED,
            DEFECTS,
            ASSIGNEDTO_ID,
        ],
    },
    Endpoint {
        name: "add_results",
        method: Post,
        path: "add_results/{run_id}",
        doc: Some("Record several results at once, keyed by test_id."),
        params: &[id("run_id"), required_field("results", Array)],
    },
    Endpoint {
        name: "add_results_for_cases",
        method: Post,
        path: "add_results_for_cases/{run_id}",
        doc: Some("Record several results at once, keyed by case_id."),
        params: &[id("run_id"), required_field("results", Array)],
    },
];

pub const RESULT_FIELDS: &[Endpoint] = &[Endpoint {
    name: "get_result_fields",
    method: Get,
    path: "get_result_fields",
    doc: Some("List the available test result fields."),
    params: &[],
}];

pub const STATUSES: &[Endpoint] = &[
    Endpoint {
        name: "get_statuses",
        method: Get,
        path: "get_statuses",
        doc: Some("List the available result statuses, including custom ones."),
        params: &[],
    },
    Endpoint {
        name: "get_case_statuses",
        method: Get,
        path: "get_case_statuses",
        doc: Some("List the available test case statuses (Enterprise only)."),
        params: &[],
    },
];
