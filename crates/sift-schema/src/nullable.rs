//! Field-level errors inside optional sections.
//!
//! `schemars` renders `Option<T>` for a referenced `T` as
//! `anyOf: [<T>, {"type": "null"}]`. A value that breaks `T` in any way then
//! fails both branches and `jsonschema` reports one "not valid under any of
//! the schemas" error at the section itself, hiding every field beneath it.
//!
//! [`resolve_nullable_options`] rewrites each such pair into
//! `{"if": {"not": {"type": "null"}}, "then": <T>}`: `null` is still
//! accepted, and any other value is checked against `T` directly so its
//! errors keep their own paths.

use serde_json::{Map, Value, json};

/// Rewrite every `anyOf: [<T>, {"type": "null"}]` in `schema`, recursively.
pub fn resolve_nullable_options(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            rewrite_any_of(map);
            for child in map.values_mut() {
                resolve_nullable_options(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve_nullable_options(item);
            }
        }
        _ => {}
    }
}

fn rewrite_any_of(map: &mut Map<String, Value>) {
    if map.contains_key("if") || map.contains_key("then") {
        return;
    }
    let Some(Value::Array(branches)) = map.get("anyOf") else {
        return;
    };
    if branches.len() != 2 {
        return;
    }
    let Some(null_at) = branches.iter().position(is_null_schema) else {
        return;
    };
    let Some(Value::Array(mut branches)) = map.remove("anyOf") else {
        return;
    };

    let inner = branches.swap_remove(1 - null_at);
    map.insert("if".into(), json!({"not": {"type": "null"}}));
    map.insert("then".into(), inner);
}

fn is_null_schema(schema: &Value) -> bool {
    schema
        .as_object()
        .is_some_and(|map| map.len() == 1 && map.get("type") == Some(&Value::from("null")))
}
