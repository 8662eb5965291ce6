//! Users.

use super::{filter, id};
use crate::operation::{Endpoint, ParamKind::*, ParamLocation, ParamSpec};
use crate::transport::HttpMethod::Get;

pub const USERS: &[Endpoint] = &[
    Endpoint {
        name: "get_user",
        method: Get,
        path: "get_user/{user_id}",
        doc: Some("Get a user by ID."),
        params: &[id("user_id")],
    },
    Endpoint {
        name: "get_user_by_email",
        method: Get,
        path: "get_user_by_email",
        doc: Some("Look up a user by email address."),
        params: &[ParamSpec::required("email", String, ParamLocation::Query)],
    },
    Endpoint {
        name: "get_current_user",
        method: Get,
        path: "get_current_user",
        doc: Some("Get the user the API credentials belong to."),
        params: &[],
    },
    Endpoint {
        name: "get_users",
        method: Get,
        path: "get_users",
        doc: Some("List users, optionally only those with access to a project."),
        params: &[filter("project_id", Integer)],
    },
];
