//! Permissive argument coercion.
//!
//! Arguments proposed by a model are normalized against a [`ToolSchema`]
//! before invocation. The contract is "never block the call, always warn":
//! unconvertible values are forwarded as-is with a diagnostic, unknown
//! argument names are retained verbatim, and a null for a required parameter
//! passes through. The underlying callable is the one that fails if a
//! mismatch is actually fatal.

use serde_json::{Map, Value};
use tracing::warn;

use crate::schema::{ParamKind, ToolSchema};

/// Coerce a flat argument map against a schema.
///
/// Never fails and never drops an argument.
pub fn coerce_arguments(args: Map<String, Value>, schema: &ToolSchema) -> Map<String, Value> {
    let mut out = Map::with_capacity(args.len());

    for (name, value) in args {
        let Some(param) = schema.get(&name) else {
            warn!(
                tool = %schema.name,
                arg = %name,
                "argument not in tool schema, forwarding unchanged"
            );
            out.insert(name, value);
            continue;
        };

        if value.is_null() {
            if param.required {
                warn!(
                    tool = %schema.name,
                    arg = %name,
                    "null supplied for required argument"
                );
            }
            out.insert(name, Value::Null);
            continue;
        }

        // Container tags pass through untouched — no deep coercion.
        if matches!(param.kind, ParamKind::List | ParamKind::Object) {
            out.insert(name, value);
            continue;
        }

        match coerce_scalar(&value, param.kind) {
            Some(coerced) => {
                out.insert(name, coerced);
            }
            None => {
                warn!(
                    tool = %schema.name,
                    arg = %name,
                    expected = param.kind.as_str(),
                    value = %value,
                    "could not coerce argument, forwarding original value"
                );
                out.insert(name, value);
            }
        }
    }

    out
}

/// Convert a value to the scalar family implied by `kind`.
///
/// Returns `None` when no sensible conversion exists.
fn coerce_scalar(value: &Value, kind: ParamKind) -> Option<Value> {
    match kind {
        ParamKind::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ParamKind::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            Value::Number(n) => {
                let f = n.as_f64()?;
                if f.fract() == 0.0 {
                    Some(Value::from(f as i64))
                } else {
                    None
                }
            }
            Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
            _ => None,
        },
        ParamKind::Number => match value {
            Value::Number(_) => Some(value.clone()),
            Value::String(s) => s.trim().parse::<f64>().ok().map(Value::from),
            _ => None,
        },
        ParamKind::Boolean => match value {
            Value::Bool(_) => Some(value.clone()),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        // Handled by the caller.
        ParamKind::List | ParamKind::Object => Some(value.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ToolSchema;
    use serde_json::json;

    fn schema() -> ToolSchema {
        ToolSchema::new("search", "test schema")
            .param("query", ParamKind::String)
            .param_with_default("max_results", ParamKind::Integer, json!(3))
            .param_with_default("threshold", ParamKind::Number, json!(0.5))
            .param_with_default("deep", ParamKind::Boolean, json!(false))
            .nullable_param("tags", &[ParamKind::List])
    }

    fn args(pairs: Value) -> Map<String, Value> {
        pairs.as_object().unwrap().clone()
    }

    #[test]
    fn test_string_to_integer() {
        let out = coerce_arguments(args(json!({"max_results": "3"})), &schema());
        assert_eq!(out["max_results"], json!(3));
    }

    #[test]
    fn test_unconvertible_keeps_original() {
        let out = coerce_arguments(args(json!({"max_results": "abc"})), &schema());
        assert_eq!(out["max_results"], json!("abc"));
    }

    #[test]
    fn test_matching_value_passes_through() {
        let out = coerce_arguments(args(json!({"query": "rust"})), &schema());
        assert_eq!(out["query"], json!("rust"));
    }

    #[test]
    fn test_number_to_string() {
        let out = coerce_arguments(args(json!({"query": 42})), &schema());
        assert_eq!(out["query"], json!("42"));
    }

    #[test]
    fn test_string_to_bool_and_float() {
        let out = coerce_arguments(
            args(json!({"deep": "true", "threshold": "0.75"})),
            &schema(),
        );
        assert_eq!(out["deep"], json!(true));
        assert_eq!(out["threshold"], json!(0.75));
    }

    #[test]
    fn test_whole_float_to_integer() {
        let out = coerce_arguments(args(json!({"max_results": 5.0})), &schema());
        assert_eq!(out["max_results"], json!(5));
    }

    #[test]
    fn test_fractional_float_not_truncated() {
        let out = coerce_arguments(args(json!({"max_results": 5.5})), &schema());
        assert_eq!(out["max_results"], json!(5.5));
    }

    #[test]
    fn test_unknown_argument_retained() {
        let out = coerce_arguments(args(json!({"bogus": [1, 2]})), &schema());
        assert_eq!(out["bogus"], json!([1, 2]));
    }

    #[test]
    fn test_null_for_optional_passes() {
        let out = coerce_arguments(args(json!({"tags": null})), &schema());
        assert_eq!(out["tags"], Value::Null);
    }

    #[test]
    fn test_null_for_required_passes_with_diagnostic() {
        // Diagnostic only — the null still goes through.
        let out = coerce_arguments(args(json!({"query": null})), &schema());
        assert_eq!(out["query"], Value::Null);
    }

    #[test]
    fn test_list_tag_no_deep_coercion() {
        let out = coerce_arguments(args(json!({"tags": ["a", 1, true]})), &schema());
        assert_eq!(out["tags"], json!(["a", 1, true]));
    }

    #[test]
    fn test_missing_required_not_synthesized() {
        let out = coerce_arguments(args(json!({"max_results": 2})), &schema());
        assert!(!out.contains_key("query"));
    }
}
