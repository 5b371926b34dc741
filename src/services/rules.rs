use crate::artifact;
use crate::domain::models::{JsonType, ReasonCode, Rule, RuleKind, Violation};
use serde_json::Value;
use std::path::Path;

fn violation(rule: &Rule, reason_code: ReasonCode, message: String) -> Violation {
    Violation {
        rule: rule.id.clone(),
        severity: rule.severity,
        path: rule.path.clone(),
        reason_code,
        message,
    }
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "<document>"
    } else {
        path
    }
}

pub fn type_matches(expected: JsonType, v: &Value) -> bool {
    match expected {
        JsonType::Object => v.is_object(),
        JsonType::Array => v.is_array(),
        JsonType::String => v.is_string(),
        JsonType::Number => v.is_number(),
        JsonType::Integer => {
            v.is_i64() || v.is_u64() || v.as_f64().map(|f| f.fract() == 0.0).unwrap_or(false)
        }
        JsonType::Boolean => v.is_boolean(),
        JsonType::Null => v.is_null(),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_empty(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// Evaluates one rule against an artifact document. Schema paths resolve
/// against `root`.
pub fn evaluate(rule: &Rule, document: &Value, root: &Path) -> Vec<Violation> {
    let path = display_path(&rule.path);
    let Some(found) = document.pointer(&rule.path) else {
        return vec![violation(
            rule,
            ReasonCode::MissingField,
            format!("required field {path} is missing"),
        )];
    };

    match &rule.kind {
        RuleKind::Required => vec![],
        RuleKind::Type { expected } => {
            if type_matches(*expected, found) {
                vec![]
            } else {
                vec![violation(
                    rule,
                    ReasonCode::TypeMismatch,
                    format!(
                        "{path} must be {}, found {}",
                        expected.as_str(),
                        type_name(found)
                    ),
                )]
            }
        }
        RuleKind::OneOf { values } => {
            if values.iter().any(|v| v == found) {
                vec![]
            } else {
                let allowed: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                vec![violation(
                    rule,
                    ReasonCode::ValueNotAllowed,
                    format!("{path} is {found}, expected one of [{}]", allowed.join(", ")),
                )]
            }
        }
        RuleKind::Equals { value } => {
            if value == found {
                vec![]
            } else {
                vec![violation(
                    rule,
                    ReasonCode::ValueMismatch,
                    format!("{path} is {found}, expected {value}"),
                )]
            }
        }
        RuleKind::Min { value } | RuleKind::Max { value } => {
            let is_min = matches!(rule.kind, RuleKind::Min { .. });
            let (Some(actual), Some(bound)) = (found.as_f64(), value.as_f64()) else {
                return vec![violation(
                    rule,
                    ReasonCode::TypeMismatch,
                    format!("{path} must be a number, found {}", type_name(found)),
                )];
            };
            if is_min && actual < bound {
                vec![violation(
                    rule,
                    ReasonCode::BelowMinimum,
                    format!("{path} is {found}, minimum is {value}"),
                )]
            } else if !is_min && actual > bound {
                vec![violation(
                    rule,
                    ReasonCode::AboveMaximum,
                    format!("{path} is {found}, maximum is {value}"),
                )]
            } else {
                vec![]
            }
        }
        RuleKind::NonEmpty => {
            if is_empty(found) {
                vec![violation(
                    rule,
                    ReasonCode::EmptyValue,
                    format!("{path} must not be empty"),
                )]
            } else {
                vec![]
            }
        }
        RuleKind::MinItems { value } => match found.as_array() {
            Some(items) if items.len() >= *value => vec![],
            Some(items) => vec![violation(
                rule,
                ReasonCode::TooFewItems,
                format!("{path} has {} items, minimum is {value}", items.len()),
            )],
            None => vec![violation(
                rule,
                ReasonCode::TypeMismatch,
                format!("{path} must be array, found {}", type_name(found)),
            )],
        },
        RuleKind::Schema { schema } => evaluate_schema(rule, schema, found, root),
    }
}

fn evaluate_schema(rule: &Rule, schema_rel: &str, instance: &Value, root: &Path) -> Vec<Violation> {
    let schema_path = artifact::resolve(root, schema_rel);
    let schema = match artifact::load_json_file(&schema_path) {
        Ok(s) => s,
        Err(e) => {
            return vec![violation(
                rule,
                ReasonCode::SchemaUnavailable,
                format!("cannot load schema {}: {e}", schema_path.display()),
            )]
        }
    };
    let compiled = match jsonschema::JSONSchema::compile(&schema) {
        Ok(c) => c,
        Err(e) => {
            return vec![violation(
                rule,
                ReasonCode::SchemaUnavailable,
                format!("cannot compile schema {}: {e}", schema_path.display()),
            )]
        }
    };
    let messages: Vec<String> = match compiled.validate(instance) {
        Ok(()) => return vec![],
        Err(errors) => errors
            .map(|e| format!("{} at {}", e, display_path(&e.instance_path.to_string())))
            .collect(),
    };
    messages
        .into_iter()
        .map(|m| violation(rule, ReasonCode::SchemaViolation, m))
        .collect()
}
