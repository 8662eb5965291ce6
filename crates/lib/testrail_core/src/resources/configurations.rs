//! Configuration groups and configurations used by test plans.

use super::{id, required_field};
use crate::operation::{Endpoint, ParamKind::*};
use crate::transport::HttpMethod::{Get, Post};

pub const CONFIGURATIONS: &[Endpoint] = &[
    Endpoint {
        name: "get_configs",
        method: Get,
        path: "get_configs/{project_id}",
        doc: Some("List the configuration groups of a project with their configurations."),
        params: &[id("project_id")],
    },
    Endpoint {
        name: "add_config_group",
        method: Post,
        path: "add_config_group/{project_id}",
        doc: Some("Create a configuration group (e.g. Browsers)."),
        params: &[id("project_id"), required_field("name", String)],
    },
    Endpoint {
        name: "add_config",
        method: Post,
        path: "add_config/{config_group_id}",
        doc: Some("Add a configuration (e.g. Firefox) to a group."),
        params: &[id("config_group_id"), required_field("name", String)],
    },
    Endpoint {
        name: "update_config_group",
        method: Post,
        path: "update_config_group/{config_group_id}",
        doc: Some("Rename a configuration group."),
        params: &[id("config_group_id"), required_field("name", String)],
    },
    Endpoint {
        name: "update_config",
        method: Post,
        path: "update_config/{config_id}",
        doc: Some("Rename a configuration."),
        params: &[id("config_id"), required_field("name", String)],
    },
    Endpoint {
        name: "delete_config_group",
        method: Post,
        path: "delete_config_group/{config_group_id}",
        doc: Some("Delete a configuration group and its configurations."),
        params: &[id("config_group_id")],
    },
    Endpoint {
        name: "delete_config",
        method: Post,
        path: "delete_config/{config_id}",
        doc: Some("Delete a configuration."),
        params: &[id("config_id")],
    },
];
