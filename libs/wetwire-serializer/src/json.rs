//! `GoLiteral` → `serde_json::Value` descriptor-driven walk (spec.md
//! §4.3). No reflection is available, so this walks the literal tree
//! Discovery already parsed rather than a real struct's runtime shape.
//!
//! Rule order, matching spec.md §4.3:
//! 1. a recognized intrinsic call renders as its bracketed expression;
//! 2. a zero-value field is omitted entirely (never emitted as `null`
//!    or an empty object/array) — handled by the caller via
//!    [`non_zero_value`], since `omitempty` is a per-field decision;
//! 3. everything else converts structurally, preserving field order.

use crate::intrinsics;
use serde_json::{Map, Value};
use tracing::warn;
use wetwire_catalog::NameTransformer;
use wetwire_ir::GoLiteral;

/// Convert a literal to JSON, applying intrinsic detection and
/// recursive key-casing. Does not itself apply `omitempty` — callers
/// that need the "drop if zero" rule should check `is_zero()` first
/// and call this only on survivors.
pub fn to_json_value(lit: &GoLiteral, names: &NameTransformer) -> Value {
    match lit.unwrap_indirect() {
        GoLiteral::Call { callee, args } => match intrinsics::recognize(callee, args) {
            Some(intrinsic) => Value::String(intrinsic.expression()),
            None => {
                warn!(callee = %callee, "unrecognized call in resource initializer, dropped");
                Value::Null
            }
        },
        GoLiteral::Nil => Value::Null,
        GoLiteral::String(s) => Value::String(s.clone()),
        GoLiteral::Int(n) => Value::from(*n),
        GoLiteral::Float(f) => serde_json::Number::from_f64(*f)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        GoLiteral::Bool(b) => Value::Bool(*b),
        GoLiteral::Ident(name) => Value::String(name.clone()),
        GoLiteral::Composite { fields, .. } => {
            let mut map = Map::new();
            for (field_name, value) in fields {
                if value.is_zero() {
                    continue;
                }
                map.insert(names.pascal_to_camel(field_name), to_json_value(value, names));
            }
            Value::Object(map)
        }
        GoLiteral::Slice(items) => {
            Value::Array(items.iter().map(|i| to_json_value(i, names)).collect())
        }
        GoLiteral::Map(entries) => {
            let mut pairs: Vec<(String, Value)> = entries
                .iter()
                .map(|(k, v)| (map_key(k), to_json_value(v, names)))
                .collect();
            pairs.sort_by(|a, b| a.0.cmp(&b.0));
            let mut map = Map::new();
            for (k, v) in pairs {
                map.insert(k, v);
            }
            Value::Object(map)
        }
        GoLiteral::Indirect(_) => unreachable!("unwrapped above"),
    }
}

fn map_key(lit: &GoLiteral) -> String {
    match lit.unwrap_indirect() {
        GoLiteral::String(s) => s.clone(),
        GoLiteral::Ident(s) => s.clone(),
        other => format!("{other:?}"),
    }
}

/// `None` when `value` is the Go zero value, else the converted JSON
/// (the `omitempty` gate used for a struct's own named fields, as
/// opposed to nested fields inside a value already known to survive).
pub fn non_zero_value(value: &GoLiteral, names: &NameTransformer) -> Option<Value> {
    if value.is_zero() {
        None
    } else {
        Some(to_json_value(value, names))
    }
}
