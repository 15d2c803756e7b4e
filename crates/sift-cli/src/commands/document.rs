//! Reading protocol documents from disk, with optional default substitution.

use std::path::Path;

use anyhow::Context;
use serde_json::{Map, Value, json};
use sift_config::DefaultsConfig;

/// Read and parse a JSON protocol document.
///
/// With `defaults`, gaps are filled by [`apply_defaults`] before the document
/// reaches validation.
pub fn load(path: &Path, defaults: Option<&DefaultsConfig>) -> anyhow::Result<Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut document: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    if let Some(defaults) = defaults {
        apply_defaults(&mut document, defaults);
    }
    Ok(document)
}

/// Substitute config defaults into an incomplete document.
///
/// Adds the default extraction field when `category` is absent, null or an
/// empty list, and the default exclusion criterion when a `screening` section
/// lists no criteria. Values of the wrong shape are left for the validator to
/// report.
pub fn apply_defaults(document: &mut Value, defaults: &DefaultsConfig) {
    let Some(root) = document.as_object_mut() else {
        return;
    };

    if is_missing_or_empty(root, "category") {
        let field = &defaults.extraction_field;
        tracing::info!(field = %field.name, "adding default extraction field");
        root.insert(
            "category".to_string(),
            json!([{
                "category_type": "Simple",
                "name": field.name,
                "title": field.title,
                "type": field.field_type,
                "mandatory": false,
            }]),
        );
    }

    if let Some(Value::Object(screening)) = root.get_mut("screening")
        && is_missing_or_empty(screening, "exclusion_criteria")
    {
        tracing::info!(criterion = %defaults.exclusion_criterion, "adding default exclusion criterion");
        screening.insert(
            "exclusion_criteria".to_string(),
            json!([{ "name": defaults.exclusion_criterion }]),
        );
    }
}

fn is_missing_or_empty(object: &Map<String, Value>, key: &str) -> bool {
    match object.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}
