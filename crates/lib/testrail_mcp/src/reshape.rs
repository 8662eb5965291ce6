// @zen-component: MCP-FieldReshape
//
//! Parameter reshaping for case-creating and case-updating actions.
//!
//! Callers tend to pass TestRail custom fields (`custom_*`) as top-level
//! parameters. The case operations only accept them inside a single
//! `custom_fields` container, so unknown top-level keys are folded into it
//! before dispatch.

use serde_json::{Map, Value};

/// Container key that receives unrecognized top-level fields.
pub const CUSTOM_FIELDS: &str = "custom_fields";

/// One action whose unknown top-level fields are moved into a container.
///
/// Known fields are the parameter names of the resolved operation, so the
/// rule follows the endpoint table without a second list to keep in sync.
#[derive(Debug, Clone, Copy)]
pub struct FieldReshapeRule {
    pub action: &'static str,
    pub container: &'static str,
}

pub const CASE_RULES: &[FieldReshapeRule] = &[
    FieldReshapeRule {
        action: "add_case",
        container: CUSTOM_FIELDS,
    },
    FieldReshapeRule {
        action: "update_case",
        container: CUSTOM_FIELDS,
    },
];

impl FieldReshapeRule {
    /// Move every key of `params` outside `known` into the container.
    ///
    /// On a key collision the value the caller already nested wins. Without
    /// unknown keys the input comes back untouched, so no empty container is
    /// ever introduced. A container that is present but not an object is
    /// left alone together with the unknown keys.
    pub fn apply(&self, known: &[&str], mut params: Map<String, Value>) -> Map<String, Value> {
        let unknown: Vec<String> = params
            .keys()
            .filter(|k| k.as_str() != self.container && !known.contains(&k.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            return params;
        }

        let mut container = match params.remove(self.container) {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(existing)) => existing,
            Some(other) => {
                params.insert(self.container.to_string(), other);
                return params;
            }
        };

        for key in unknown {
            if let Some(value) = params.remove(&key) {
                container.entry(key).or_insert(value);
            }
        }
        params.insert(self.container.to_string(), Value::Object(container));
        params
    }
}

/// Which modules and actions get their parameters reshaped.
#[derive(Debug, Clone, Copy)]
pub struct ReshapePolicy {
    modules: &'static [&'static str],
    rules: &'static [FieldReshapeRule],
}

impl Default for ReshapePolicy {
    fn default() -> Self {
        Self {
            modules: &["cases"],
            rules: CASE_RULES,
        }
    }
}

impl ReshapePolicy {
    pub fn rule_for(&self, module: &str, action: &str) -> Option<&'static FieldReshapeRule> {
        if !self.modules.contains(&module) {
            return None;
        }
        self.rules.iter().find(|rule| rule.action == action)
    }

    /// Reshape `params` for `module.action`, or pass them through unchanged.
    ///
    /// `known` lists the parameter names the operation accepts at top level.
    pub fn apply(
        &self,
        module: &str,
        action: &str,
        known: &[&str],
        params: Map<String, Value>,
    ) -> Map<String, Value> {
        match self.rule_for(module, action) {
            Some(rule) => rule.apply(known, params),
            None => params,
        }
    }
}
