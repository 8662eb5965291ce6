//! Milestones.

use super::{LIMIT, OFFSET, field, filter, id, required_field};
use crate::operation::{Endpoint, ParamKind::*};
use crate::transport::HttpMethod::{Get, Post};

pub const MILESTONES: &[Endpoint] = &[
    Endpoint {
        name: "get_milestone",
        method: Get,
        path: "get_milestone/{milestone_id}",
        doc: Some("Get a milestone by ID."),
        params: &[id("milestone_id")],
    },
    Endpoint {
        name: "get_milestones",
        method: Get,
        path: "get_milestones/{project_id}",
        doc: Some("List the milestones of a project."),
        params: &[
            id("project_id"),
            filter("is_completed", Boolean),
            filter("is_started", Boolean),
            LIMIT,
            OFFSET,
        ],
    },
    Endpoint {
        name: "add_milestone",
        method: Post,
        path: "add_milestone/{project_id}",
        doc: Some(
            "Create a milestone.\n\nDates (due_on, start_on) are UNIX timestamps.",
        ),
        params: &[
            id("project_id"),
            required_field("name", String),
            field("description", String),
            field("due_on", Integer),
            field("start_on", Integer),
            field("parent_id", Integer),
            field("refs", String),
        ],
    },
    Endpoint {
        name: "update_milestone",
        method: Post,
        path: "update_milestone/{milestone_id}",
        doc: Some("Update a milestone, e.g. to mark it started or completed."),
        params: &[
            id("milestone_id"),
            field("name", String),
            field("description", String),
            field("due_on", Integer),
            field("start_on", Integer),
            field("is_completed", Boolean),
            field("is_started", Boolean),
            field("parent_id", Integer),
        ],
    },
    Endpoint {
        name: "delete_milestone",
        method: Post,
        path: "delete_milestone/{milestone_id}",
        doc: Some("Delete a milestone."),
        params: &[id("milestone_id")],
    },
];
