//! Resource modules of the TestRail API v2.
//!
//! Each submodule holds static [`Endpoint`] tables, one per module name in
//! [`MODULE_NAMES`]. The tables are data: adding an operation means adding a
//! struct literal, nothing else.

pub mod cases;
pub mod configurations;
pub mod milestones;
pub mod plans;
pub mod projects;
pub mod reports;
pub mod results;
pub mod runs;
pub mod users;

use std::collections::HashSet;
use std::sync::Arc;

use crate::client::ApiModule;
use crate::error::EnumerationError;
use crate::operation::{
    BoundOperation, Endpoint, EndpointInvoker, ParamKind, ParamLocation, ParamSpec,
};
use crate::transport::HttpTransport;

/// The fixed, known list of resource modules, in registration order.
pub const MODULE_NAMES: &[&str] = &[
    "projects",
    "suites",
    "sections",
    "cases",
    "case_fields",
    "case_types",
    "priorities",
    "templates",
    "milestones",
    "plans",
    "runs",
    "tests",
    "results",
    "result_fields",
    "statuses",
    "users",
    "configurations",
    "reports",
];

/// Endpoint table for a module name.
pub fn endpoints(module: &str) -> Option<&'static [Endpoint]> {
    let table: &'static [Endpoint] = match module {
        "projects" => projects::PROJECTS,
        "suites" => projects::SUITES,
        "sections" => projects::SECTIONS,
        "cases" => cases::CASES,
        "case_fields" => cases::CASE_FIELDS,
        "case_types" => cases::CASE_TYPES,
        "priorities" => cases::PRIORITIES,
        "templates" => cases::TEMPLATES,
        "milestones" => milestones::MILESTONES,
        "plans" => plans::PLANS,
        "runs" => runs::RUNS,
        "tests" => runs::TESTS,
        "results" => results::RESULTS,
        "result_fields" => results::RESULT_FIELDS,
        "statuses" => results::STATUSES,
        "users" => users::USERS,
        "configurations" => configurations::CONFIGURATIONS,
        "reports" => reports::REPORTS,
        _ => return None,
    };
    Some(table)
}

/// A resource module: an endpoint table bound to the shared transport.
pub struct Resource {
    endpoints: &'static [Endpoint],
    transport: Arc<HttpTransport>,
}

impl Resource {
    pub fn new(endpoints: &'static [Endpoint], transport: Arc<HttpTransport>) -> Self {
        Self {
            endpoints,
            transport,
        }
    }
}

impl ApiModule for Resource {
    fn operations(&self) -> Result<Vec<BoundOperation>, EnumerationError> {
        let mut seen = HashSet::new();
        self.endpoints
            .iter()
            .map(|endpoint| {
                endpoint.validate()?;
                if !seen.insert(endpoint.name) {
                    return Err(EnumerationError::DuplicateOperation(endpoint.name.to_string()));
                }
                Ok(BoundOperation {
                    name: endpoint.name.to_string(),
                    doc: endpoint.doc.map(str::to_string),
                    params: endpoint.params.to_vec(),
                    invoker: Arc::new(EndpointInvoker::new(self.transport.clone(), endpoint)),
                })
            })
            .collect()
    }
}

/// Required integer path parameter.
pub(crate) const fn id(name: &'static str) -> ParamSpec {
    ParamSpec::required(name, ParamKind::Integer, ParamLocation::Path)
}

/// Optional query-string filter.
pub(crate) const fn filter(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec::optional(name, kind, ParamLocation::Query)
}

/// Optional body field.
pub(crate) const fn field(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec::optional(name, kind, ParamLocation::Body)
}

/// Required body field.
pub(crate) const fn required_field(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec::required(name, kind, ParamLocation::Body)
}

pub(crate) const LIMIT: ParamSpec = filter("limit", ParamKind::Integer);
pub(crate) const OFFSET: ParamSpec = filter("offset", ParamKind::Integer);
