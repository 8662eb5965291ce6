//! Projects, suites and sections.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*};
use crate::transport::HttpMethod::{Get, Post};

pub const PROJECTS: &[Endpoint] = &[
    Endpoint {
        name: "get_project",
        method: Get,
        path: "get_project/{project_id}",
        doc: Some("Get a project by ID."),
        params: &[id("project_id")],
    },
    Endpoint {
        name: "get_projects",
        method: Get,
        path: "get_projects",
        doc: Some(
            "List all projects.\n\nPass is_completed=true for completed projects only, false for active ones.",
        ),
        params: &[filter("is_completed", Boolean), LIMIT, OFFSET],
    },
    Endpoint {
        name: "add_project",
        method: Post,
        path: "add_project",
        doc: Some(
            "Create a new project.\n\nsuite_mode: 1 single suite, 2 single suite + baselines, 3 multiple suites.",
        ),
        params: &[
            required_field("name", String),
            field("announcement", String),
            field("show_announcement", Boolean),
            field("suite_mode", Integer),
        ],
    },
    Endpoint {
        name: "update_project",
        method: Post,
        path: "update_project/{project_id}",
        doc: Some("Update an existing project. Only supplied fields change."),
        params: &[
            id("project_id"),
            field("name", String),
            field("announcement", String),
            field("show_announcement", Boolean),
            field("is_completed", Boolean),
        ],
    },
    Endpoint {
        name: "delete_project",
        method: Post,
        path: "delete_project/{project_id}",
        doc: Some("Delete a project. This cannot be undone."),
        params: &[id("project_id")],
    },
];

pub const SUITES: &[Endpoint] = &[
    Endpoint {
        name: "get_suite",
        method: Get,
        path: "get_suite/{suite_id}",
        doc: Some("Get a test suite by ID."),
        params: &[id("suite_id")],
    },
    Endpoint {
        name: "get_suites",
        method: Get,
        path: "get_suites/{project_id}",
        doc: Some("List the test suites of a project."),
        params: &[id("project_id")],
    },
    Endpoint {
        name: "add_suite",
        method: Post,
        path: "add_suite/{project_id}",
        doc: Some("Create a test suite in a project."),
        params: &[
            id("project_id"),
            required_field("name", String),
            field("description", String),
        ],
    },
    Endpoint {
        name: "update_suite",
        method: Post,
        path: "update_suite/{suite_id}",
        doc: Some("Update a test suite."),
        params: &[
            id("suite_id"),
            field("name", String),
            field("description", String),
        ],
    },
    Endpoint {
        name: "delete_suite",
        method: Post,
        path: "delete_suite/{suite_id}",
        doc: Some("Delete a test suite together with its sections and cases."),
        params: &[id("suite_id")],
    },
];

pub const SECTIONS: &[Endpoint] = &[
    Endpoint {
        name: "get_section",
        method: Get,
        path: "get_section/{section_id}",
        doc: Some("Get a section by ID."),
        params: &[id("section_id")],
    },
    Endpoint {
        name: "get_sections",
        method: Get,
        path: "get_sections/{project_id}",
        doc: Some(
            "List the sections of a project.\n\nsuite_id is required for projects in multi-suite mode.",
        ),
        params: &[id("project_id"), filter("suite_id", Integer), LIMIT, OFFSET],
    },
    Endpoint {
        name: "add_section",
        method: Post,
        path: "add_section/{project_id}",
        doc: Some("Create a section, optionally nested under parent_id."),
        params: &[
            id("project_id"),
            required_field("name", String),
            field("suite_id", Integer),
            field("parent_id", Integer),
            field("description", String),
        ],
    },
    Endpoint {
        name: "update_section",
        method: Post,
        path: "update_section/{section_id}",
        doc: Some("Rename or re-describe a section."),
        params: &[
            id("section_id"),
            field("name", String),
            field("description", String),
        ],
    },
    Endpoint {
        name: "move_section",
        method: Post,
        path: "move_section/{section_id}",
        doc: Some("Move a section under a new parent or after a sibling."),
        params: &[
            id("section_id"),
            field("parent_id", Integer),
            field("after_id", Integer),
        ],
    },
    Endpoint {
        name: "delete_section",
        method: Post,
        path: "delete_section/{section_id}",
        doc: Some("Delete a section together with its cases."),
        params: &[id("section_id")],
    },
];
