//! Report templates configured for API access.

use super::id;
use crate::operation::Endpoint;
use crate::transport::HttpMethod::Get;

pub const REPORTS: &[Endpoint] = &[
    Endpoint {
        name: "get_reports",
        method: Get,
        path: "get_reports/{project_id}",
        doc: Some("List the API-accessible report templates of a project."),
        params: &[id("project_id")],
    },
    Endpoint {
        name: "run_report",
        method: Get,
        path: "run_report/{report_template_id}",
        doc: Some("Run a report template and return links to the generated report."),
        params: &[id("report_template_id")],
    },
];
