//! Tag-dispatched validation for internally tagged enums.
//!
//! `schemars` renders `#[serde(tag = "...")]` enums as a `oneOf` whose
//! branches each pin the tag property to a constant. Validating against a
//! `oneOf` reports a single "not valid under any of the schemas" error at the
//! union's location when a payload field is wrong, hiding the offending field.
//!
//! [`resolve_tagged_unions`] rewrites every such `oneOf` into:
//!
//! ```json
//! {
//!   "type": "object",
//!   "required": ["<tag>"],
//!   "properties": { "<tag>": { "type": "string", "enum": ["A", "B"] } },
//!   "allOf": [
//!     { "if": { "properties": { "<tag>": { "const": "A" } }, "required": ["<tag>"] },
//!       "then": <branch A> },
//!     { "if": { "properties": { "<tag>": { "const": "B" } }, "required": ["<tag>"] },
//!       "then": <branch B> }
//!   ]
//! }
//! ```
//!
//! An unknown tag then fails the `enum` at `/…/<tag>`, and a known tag
//! applies exactly one branch, so payload errors keep their own paths.

use serde_json::{Map, Value};

/// Rewrite every tag-discriminated `oneOf` in `schema`, recursively.
///
/// `oneOf` blocks whose branches do not share a constant string property with
/// pairwise distinct values are left untouched.
pub fn resolve_tagged_unions(schema: &mut Value) {
    match schema {
        Value::Object(map) => {
            rewrite_one_of(map);
            for child in map.values_mut() {
                resolve_tagged_unions(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                resolve_tagged_unions(item);
            }
        }
        _ => {}
    }
}

fn rewrite_one_of(map: &mut Map<String, Value>) {
    let Some(Value::Array(branches)) = map.get("oneOf") else {
        return;
    };
    let Some((tag, values)) = common_tag(branches) else {
        return;
    };
    let Some(Value::Array(branches)) = map.remove("oneOf") else {
        return;
    };

    let conditionals = branches
        .into_iter()
        .zip(&values)
        .map(|(branch, value)| {
            let mut condition = Map::new();
            condition.insert(
                "properties".into(),
                object(&tag, object("const", Value::String(value.clone()))),
            );
            condition.insert("required".into(), Value::Array(vec![Value::String(tag.clone())]));

            let mut conditional = Map::new();
            conditional.insert("if".into(), Value::Object(condition));
            conditional.insert("then".into(), branch);
            Value::Object(conditional)
        })
        .collect::<Vec<_>>();

    let mut tag_schema = Map::new();
    tag_schema.insert("type".into(), Value::String("string".into()));
    tag_schema.insert(
        "enum".into(),
        Value::Array(values.iter().cloned().map(Value::String).collect()),
    );

    map.insert("type".into(), Value::String("object".into()));

    let required = map
        .entry("required")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(required) = required {
        if !required.iter().any(|r| r.as_str() == Some(tag.as_str())) {
            required.push(Value::String(tag.clone()));
        }
    }

    let properties = map
        .entry("properties")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(properties) = properties {
        properties.insert(tag, Value::Object(tag_schema));
    }

    let all_of = map
        .entry("allOf")
        .or_insert_with(|| Value::Array(Vec::new()));
    if let Value::Array(all_of) = all_of {
        all_of.extend(conditionals);
    }
}

/// Find the property every branch pins to a distinct constant string.
fn common_tag(branches: &[Value]) -> Option<(String, Vec<String>)> {
    let first = branches.first()?;

    for (candidate, _) in tag_constants(first) {
        let values: Option<Vec<String>> = branches
            .iter()
            .map(|branch| {
                tag_constants(branch)
                    .into_iter()
                    .find(|(name, _)| *name == candidate)
                    .map(|(_, value)| value)
            })
            .collect();

        if let Some(values) = values {
            let mut distinct = values.clone();
            distinct.sort_unstable();
            distinct.dedup();
            if distinct.len() == values.len() {
                return Some((candidate, values));
            }
        }
    }
    None
}

/// Constant-valued string properties of one branch, looking through `allOf`.
fn tag_constants(branch: &Value) -> Vec<(String, String)> {
    let mut found = Vec::new();
    collect_constants(branch, &mut found);
    if let Some(Value::Array(parts)) = branch.get("allOf") {
        for part in parts {
            collect_constants(part, &mut found);
        }
    }
    found
}

fn collect_constants(schema: &Value, out: &mut Vec<(String, String)>) {
    let Some(Value::Object(properties)) = schema.get("properties") else {
        return;
    };
    for (name, property) in properties {
        let constant = match (property.get("const"), property.get("enum")) {
            (Some(Value::String(value)), _) => Some(value.clone()),
            (None, Some(Value::Array(values))) if values.len() == 1 => {
                values[0].as_str().map(str::to_owned)
            }
            _ => None,
        };
        if let Some(value) = constant {
            out.push((name.clone(), value));
        }
    }
}

fn object(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_owned(), value);
    Value::Object(map)
}
