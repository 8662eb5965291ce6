// @zen-component: TR-OperationModel
//
//! Operation registration model.
//!
//! Every remote procedure is declared as an [`Endpoint`] struct literal:
//! name, HTTP method, path template, documentation and an ordered parameter
//! list. Binding a JSON argument map against an endpoint produces a
//! [`BoundRequest`] or an [`ArgumentError`] without touching the network.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Number, Value};

use crate::error::{ArgumentError, EnumerationError, InvokeError};
use crate::transport::{HttpMethod, HttpTransport};

/// JSON value type a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
    Any,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }

    /// JSON Schema `type` for this kind; `None` for [`ParamKind::Any`].
    pub fn json_type(self) -> Option<&'static str> {
        match self {
            Self::Any => None,
            other => Some(other.as_str()),
        }
    }

    /// Accept `value` for this kind, coercing numeric and boolean strings.
    fn coerce(self, name: &str, value: Value) -> Result<Value, ArgumentError> {
        let invalid = |value: &Value| ArgumentError::InvalidType {
            name: name.to_string(),
            expected: self.as_str(),
            found: json_type_name(value),
        };

        match (self, value) {
            (Self::Any, v) => Ok(v),
            (Self::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(Value::Number(n)),
            (Self::Integer, Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .map_err(|_| invalid(&Value::String(s))),
            (Self::Number, Value::Number(n)) => Ok(Value::Number(n)),
            (Self::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| invalid(&Value::String(s))),
            (Self::String, Value::String(s)) => Ok(Value::String(s)),
            (Self::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
            (Self::Boolean, Value::Bool(b)) => Ok(Value::Bool(b)),
            (Self::Boolean, Value::String(s)) => {
                let normalized = s.trim().to_ascii_lowercase();
                match normalized.as_str() {
                    "true" | "1" => Ok(Value::Bool(true)),
                    "false" | "0" => Ok(Value::Bool(false)),
                    _ => Err(invalid(&Value::String(s))),
                }
            }
            (Self::Array, Value::Array(a)) => Ok(Value::Array(a)),
            (Self::Object, Value::Object(o)) => Ok(Value::Object(o)),
            (_, other) => Err(invalid(&other)),
        }
    }
}

/// Where a bound argument is placed in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    /// Substituted into the `{name}` placeholder of the path template.
    Path,
    /// Appended as a query parameter.
    Query,
    /// Set as a top-level key of the JSON body.
    Body,
    /// An object whose entries are merged into the top level of the body.
    /// Fixed body parameters win on key collision.
    BodyFields,
}

/// Default behaviour of a parameter the caller omits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamDefault {
    Required,
    /// Optional; omitted from the request when absent.
    Null,
    /// Optional; this JSON literal is sent when absent.
    Literal(&'static str),
}

/// One declared parameter of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub location: ParamLocation,
    pub default: ParamDefault,
}

impl ParamSpec {
    pub const fn required(name: &'static str, kind: ParamKind, location: ParamLocation) -> Self {
        Self {
            name,
            kind,
            location,
            default: ParamDefault::Required,
        }
    }

    pub const fn optional(name: &'static str, kind: ParamKind, location: ParamLocation) -> Self {
        Self {
            name,
            kind,
            location,
            default: ParamDefault::Null,
        }
    }

    pub const fn with_default(self, literal: &'static str) -> Self {
        Self {
            default: ParamDefault::Literal(literal),
            ..self
        }
    }

    pub fn is_required(&self) -> bool {
        self.default == ParamDefault::Required
    }
}

/// A declared TestRail endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    pub name: &'static str,
    pub method: HttpMethod,
    /// Path template relative to `index.php?/api/v2/`, e.g. `get_case/{case_id}`.
    pub path: &'static str,
    pub doc: Option<&'static str>,
    pub params: &'static [ParamSpec],
}

/// A request ready to be sent by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Endpoint {
    /// Check that path placeholders and path parameters correspond one to one.
    pub fn validate(&self) -> Result<(), EnumerationError> {
        let placeholders = placeholders(self.path);
        for placeholder in &placeholders {
            let bound = self
                .params
                .iter()
                .any(|p| p.location == ParamLocation::Path && p.name == *placeholder);
            if !bound {
                return Err(EnumerationError::UnboundPlaceholder {
                    operation: self.name.to_string(),
                    placeholder: placeholder.to_string(),
                });
            }
        }
        for param in self.params.iter().filter(|p| p.location == ParamLocation::Path) {
            if !placeholders.contains(&param.name) {
                return Err(EnumerationError::UnusedPathParameter {
                    operation: self.name.to_string(),
                    parameter: param.name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Bind named arguments to this endpoint's parameters.
    ///
    /// `null` is treated the same as an omitted argument.
    pub fn bind(&self, mut args: Map<String, Value>) -> Result<BoundRequest, ArgumentError> {
        let mut unexpected: Vec<String> = args
            .keys()
            .filter(|key| !self.params.iter().any(|p| p.name == key.as_str()))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            unexpected.sort();
            return Err(ArgumentError::Unexpected(unexpected));
        }

        let missing: Vec<String> = self
            .params
            .iter()
            .filter(|p| p.is_required() && args.get(p.name).is_none_or(Value::is_null))
            .map(|p| p.name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ArgumentError::Missing(missing));
        }

        let mut path = self.path.to_string();
        let mut query = Vec::new();
        let mut body = Map::new();
        let mut extra_fields = Map::new();

        for param in self.params {
            let value = match args.remove(param.name) {
                Some(Value::Null) | None => match param.default {
                    ParamDefault::Literal(literal) => match serde_json::from_str(literal) {
                        Ok(v) => v,
                        Err(_) => continue,
                    },
                    _ => continue,
                },
                Some(v) => v,
            };
            let value = param.kind.coerce(param.name, value)?;

            match param.location {
                ParamLocation::Path => {
                    path = path.replace(&format!("{{{}}}", param.name), &render_scalar(&value));
                }
                ParamLocation::Query => query.push((param.name.to_string(), render_scalar(&value))),
                ParamLocation::Body => {
                    body.insert(param.name.to_string(), value);
                }
                ParamLocation::BodyFields => match value {
                    Value::Object(fields) => extra_fields.extend(fields),
                    other => {
                        return Err(ArgumentError::InvalidType {
                            name: param.name.to_string(),
                            expected: "object",
                            found: json_type_name(&other),
                        });
                    }
                },
            }
        }

        for (key, value) in extra_fields {
            body.entry(key).or_insert(value);
        }

        let body = match self.method {
            HttpMethod::Get | HttpMethod::Delete => None,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => Some(Value::Object(body)),
        };

        Ok(BoundRequest {
            method: self.method,
            path,
            query,
            body,
        })
    }
}

/// Callable bound to a specific module instance.
#[async_trait]
pub trait Invoke: Send + Sync {
    async fn invoke(&self, args: Map<String, Value>) -> Result<Value, InvokeError>;
}

/// An operation as yielded by a module: metadata plus its bound callable.
#[derive(Clone)]
pub struct BoundOperation {
    pub name: String,
    pub doc: Option<String>,
    pub params: Vec<ParamSpec>,
    pub invoker: Arc<dyn Invoke>,
}

impl std::fmt::Debug for BoundOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundOperation")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Invokes an [`Endpoint`] through the shared transport.
pub struct EndpointInvoker {
    transport: Arc<HttpTransport>,
    endpoint: &'static Endpoint,
}

impl EndpointInvoker {
    pub fn new(transport: Arc<HttpTransport>, endpoint: &'static Endpoint) -> Self {
        Self {
            transport,
            endpoint,
        }
    }
}

#[async_trait]
impl Invoke for EndpointInvoker {
    async fn invoke(&self, args: Map<String, Value>) -> Result<Value, InvokeError> {
        let request = self.endpoint.bind(args)?;
        let result = self
            .transport
            .request(
                request.method,
                &request.path,
                &request.query,
                request.body.as_ref(),
            )
            .await?;
        Ok(result)
    }
}

/// Names between `{` and `}` in a path template.
fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(&after[..end]);
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Render a value for a path segment or query string.
///
/// Booleans become `1`/`0` and arrays are comma-joined, matching TestRail's
/// filter syntax.
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Array(items) => items
            .iter()
            .map(render_scalar)
            .collect::<Vec<_>>()
            .join(","),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::ParamKind as K;
    use super::ParamLocation as L;
    use super::*;

    const GET_CASES: Endpoint = Endpoint {
        name: "get_cases",
        method: HttpMethod::Get,
        path: "get_cases/{project_id}",
        doc: Some("List cases."),
        params: &[
            ParamSpec::required("project_id", K::Integer, L::Path),
            ParamSpec::optional("suite_id", K::Integer, L::Query),
            ParamSpec::optional("is_completed", K::Boolean, L::Query),
            ParamSpec::optional("limit", K::Integer, L::Query).with_default("250"),
        ],
    };

    const ADD_CASE: Endpoint = Endpoint {
        name: "add_case",
        method: HttpMethod::Post,
        path: "add_case/{section_id}",
        doc: None,
        params: &[
            ParamSpec::required("section_id", K::Integer, L::Path),
            ParamSpec::required("title", K::String, L::Body),
            ParamSpec::optional("custom_fields", K::Object, L::BodyFields),
        ],
    };

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object")
    }

    #[test]
    fn binds_path_query_and_defaults() {
        let req = GET_CASES
            .bind(args(json!({"project_id": 1, "suite_id": "4", "is_completed": false})))
            .expect("bind");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "get_cases/1");
        assert_eq!(
            req.query,
            vec![
                ("suite_id".to_string(), "4".to_string()),
                ("is_completed".to_string(), "0".to_string()),
                ("limit".to_string(), "250".to_string()),
            ]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn null_optional_arguments_are_omitted() {
        let req = GET_CASES
            .bind(args(json!({"project_id": 1, "suite_id": null, "limit": null})))
            .expect("bind");
        assert_eq!(req.query, vec![("limit".to_string(), "250".to_string())]);
    }

    #[test]
    fn reports_missing_required_parameters_in_order() {
        let err = ADD_CASE.bind(Map::new()).expect_err("should fail");
        assert_eq!(
            err,
            ArgumentError::Missing(vec!["section_id".into(), "title".into()])
        );
    }

    #[test]
    fn rejects_unexpected_parameters() {
        let err = GET_CASES
            .bind(args(json!({"project_id": 1, "zeta": 1, "alpha": 2})))
            .expect_err("should fail");
        assert_eq!(err, ArgumentError::Unexpected(vec!["alpha".into(), "zeta".into()]));
    }

    #[test]
    fn rejects_mistyped_arguments() {
        let err = GET_CASES
            .bind(args(json!({"project_id": "abc"})))
            .expect_err("should fail");
        assert_eq!(
            err,
            ArgumentError::InvalidType {
                name: "project_id".into(),
                expected: "integer",
                found: "string",
            }
        );
    }

    #[test]
    fn body_fields_are_flattened_and_fixed_fields_win() {
        let req = ADD_CASE
            .bind(args(json!({
                "section_id": 5,
                "title": "Login works",
                "custom_fields": {"custom_severity": "high", "title": "ignored"}
            })))
            .expect("bind");
        assert_eq!(req.path, "add_case/5");
        assert_eq!(
            req.body,
            Some(json!({"title": "Login works", "custom_severity": "high"}))
        );
    }

    #[test]
    fn post_without_body_params_sends_empty_object() {
        const CLOSE_RUN: Endpoint = Endpoint {
            name: "close_run",
            method: HttpMethod::Post,
            path: "close_run/{run_id}",
            doc: None,
            params: &[ParamSpec::required("run_id", K::Integer, L::Path)],
        };
        let req = CLOSE_RUN.bind(args(json!({"run_id": 9}))).expect("bind");
        assert_eq!(req.body, Some(json!({})));
    }

    #[test]
    fn validate_detects_placeholder_mismatches() {
        const BROKEN: Endpoint = Endpoint {
            name: "get_test",
            method: HttpMethod::Get,
            path: "get_test/{test_id}",
            doc: None,
            params: &[ParamSpec::required("id", K::Integer, L::Path)],
        };
        assert!(matches!(
            BROKEN.validate(),
            Err(EnumerationError::UnboundPlaceholder { .. })
        ));
        assert!(GET_CASES.validate().is_ok());
    }

    #[test]
    fn arrays_render_comma_joined() {
        assert_eq!(render_scalar(&json!([1, 2, 5])), "1,2,5");
        assert_eq!(placeholders("get_results_for_case/{run_id}/{case_id}"), vec!["run_id", "case_id"]);
    }
}
