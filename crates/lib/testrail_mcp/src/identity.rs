// @zen-component: MCP-IdentityMetadata
//
//! Identity and metadata derived from operation registrations.
//!
//! Everything here is a pure transformation of a module/operation name pair,
//! a parameter list and an optional documentation string. Both tool naming
//! schemes (`<ns>_<module>` and `<ns>_<module>_<operation>`) come from this
//! module so they can never drift apart.

use std::fmt;

use serde_json::{Map, Value, json};
use testrail_core::{ParamDefault, ParamKind, ParamSpec};

/// Name of the implicit receiver parameter. Never part of a signature.
const RECEIVER: &str = "self";

/// Tool name of a module's routed entry point.
pub fn router_tool_name(namespace: &str, module: &str) -> String {
    format!("{namespace}_{module}")
}

/// Tool name addressing a single operation directly.
pub fn operation_tool_name(namespace: &str, module: &str, operation: &str) -> String {
    format!("{namespace}_{module}_{operation}")
}

/// First line of the documentation, trimmed. Empty when undocumented.
pub fn summarize(doc: Option<&str>) -> String {
    doc.map(str::trim)
        .and_then(|d| d.lines().next())
        .map(|line| line.trim().to_string())
        .unwrap_or_default()
}

/// One parameter of a calling signature.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParamKind,
    pub has_default: bool,
    /// Declared default; `Value::Null` for optional parameters without one.
    pub default: Option<Value>,
}

impl ParameterDescriptor {
    fn from_param(param: &ParamSpec) -> Self {
        let default = match param.default {
            ParamDefault::Required => None,
            ParamDefault::Null => Some(Value::Null),
            // A malformed literal is kept verbatim rather than rejected.
            ParamDefault::Literal(raw) => Some(
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
            ),
        };
        Self {
            name: param.name.to_string(),
            kind: param.kind,
            has_default: default.is_some(),
            default,
        }
    }
}

/// Ordered calling signature with the receiver removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    parameters: Vec<ParameterDescriptor>,
}

impl Signature {
    pub fn from_params(params: &[ParamSpec]) -> Self {
        Self {
            parameters: params
                .iter()
                .filter(|p| p.name != RECEIVER)
                .map(ParameterDescriptor::from_param)
                .collect(),
        }
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parameters.iter().map(|p| p.name.as_str())
    }

    /// Names of parameters without defaults, in order.
    pub fn required(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|p| !p.has_default)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// JSON Schema for calling this operation directly.
    pub fn input_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        for param in &self.parameters {
            let mut property = Map::new();
            if let Some(ty) = param.kind.json_type() {
                property.insert("type".into(), json!(ty));
            }
            if let Some(default) = param.default.as_ref().filter(|d| !d.is_null()) {
                property.insert("default".into(), default.clone());
            }
            properties.insert(param.name.clone(), Value::Object(property));
        }

        let mut schema = Map::new();
        schema.insert("type".into(), json!("object"));
        schema.insert("properties".into(), Value::Object(properties));
        let required = self.required();
        if !required.is_empty() {
            schema.insert("required".into(), json!(required));
        }
        schema
    }
}

impl fmt::Display for Signature {
    /// Renders as `(section_id: integer, title: string, limit: integer = 250)`;
    /// optional parameters without a default get a `?` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, param) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match &param.default {
                None => write!(f, "{}: {}", param.name, param.kind.as_str())?,
                Some(Value::Null) => write!(f, "{}?: {}", param.name, param.kind.as_str())?,
                Some(default) => write!(f, "{}: {} = {}", param.name, param.kind.as_str(), default)?,
            }
        }
        f.write_str(")")
    }
}
