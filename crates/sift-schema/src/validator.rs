//! Review protocol validation.
//!
//! Validation runs in three passes:
//!
//! 1. Grammar: the tag-dispatched JSON Schema, collecting every violation.
//! 2. References: `depends_on` and report targets must name categories.
//! 3. Typing: deserialization into [`ReviewProtocol`].
//!
//! The first two both read the raw document, so one call reports grammar
//! and reference errors together. Typing only runs on a clean document.

use std::collections::HashSet;

use serde_json::Value;
use sift_core::protocol::ReviewProtocol;
use sift_core::responses::FieldError;

use crate::error::{SchemaError, ValidationErrors};
use crate::registry::protocol_schema;

/// Compiled validator for review protocol documents.
///
/// Compile once and reuse; validation itself is read-only.
pub struct ProtocolValidator {
    validator: jsonschema::Validator,
}

impl ProtocolValidator {
    /// Compile the protocol schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if the generated schema does not compile.
    pub fn new() -> Result<Self, SchemaError> {
        let validator = jsonschema::validator_for(&protocol_schema())
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;
        Ok(Self { validator })
    }

    /// Validate a raw protocol document and return its typed form.
    ///
    /// # Errors
    ///
    /// Returns every grammar and reference violation, each with the JSON
    /// Pointer of the offending value. A reference whose value already broke
    /// the grammar is reported once.
    pub fn validate(&self, raw: &Value) -> Result<ReviewProtocol, ValidationErrors> {
        let mut errors = self.grammar_errors(raw);
        let grammar = errors.len();
        for error in reference_errors(raw) {
            if !errors.iter().any(|e| e.path == error.path) {
                errors.push(error);
            }
        }
        if !errors.is_empty() {
            tracing::debug!(
                grammar,
                references = errors.len() - grammar,
                "protocol rejected"
            );
            return Err(ValidationErrors::new(errors));
        }

        serde_json::from_value(raw.clone())
            .map_err(|e| ValidationErrors::root(format!("invalid protocol: {e}")))
    }

    /// Parse and validate a protocol from JSON text.
    ///
    /// # Errors
    ///
    /// Returns a root-level error if `text` is not JSON, otherwise as
    /// [`Self::validate`].
    pub fn validate_str(&self, text: &str) -> Result<ReviewProtocol, ValidationErrors> {
        let raw: Value = serde_json::from_str(text)
            .map_err(|e| ValidationErrors::root(format!("malformed JSON: {e}")))?;
        self.validate(&raw)
    }

    fn grammar_errors(&self, raw: &Value) -> Vec<FieldError> {
        let mut errors: Vec<FieldError> = Vec::new();
        for error in self.validator.iter_errors(raw) {
            let error = FieldError::new(error.instance_path.to_string(), error.to_string());
            if !errors.contains(&error) {
                errors.push(error);
            }
        }
        errors
    }
}

fn reference_errors(raw: &Value) -> Vec<FieldError> {
    let categories = array_at(raw, "category");
    let mut names = HashSet::new();
    collect_names(categories, &mut names);

    let mut errors = Vec::new();
    check_categories(categories, "/category", &names, &mut errors);

    for (i, report) in array_at(raw, "reporting").iter().enumerate() {
        let fields: &[&str] = match str_at(report, "report_type") {
            Some("Simple") => &["value"],
            Some("Compared") => &["value", "reference"],
            _ => &[],
        };
        let name = str_at(report, "name").unwrap_or_default();
        for field in fields {
            let Some(target) = str_at(report, field) else {
                continue;
            };
            if !names.contains(target) {
                errors.push(FieldError::new(
                    format!("/reporting/{i}/{field}"),
                    format!("report `{name}` refers to unknown category `{target}`"),
                ));
            }
        }
    }
    errors
}

fn collect_names<'a>(categories: &'a [Value], names: &mut HashSet<&'a str>) {
    for category in categories {
        if let Some(name) = str_at(category, "name") {
            names.insert(name);
        }
        collect_names(array_at(category, "sub_categories"), names);
    }
}

fn check_categories(
    categories: &[Value],
    base: &str,
    names: &HashSet<&str>,
    errors: &mut Vec<FieldError>,
) {
    for (i, category) in categories.iter().enumerate() {
        let path = format!("{base}/{i}");

        let dependent = str_at(category, "category_type") == Some("DynamicList")
            && str_at(category, "dynamic_subtype") == Some("Dependent");
        if dependent && let Some(target) = str_at(category, "depends_on") {
            if str_at(category, "name") == Some(target) {
                errors.push(FieldError::new(
                    format!("{path}/depends_on"),
                    format!("category `{target}` cannot depend on itself"),
                ));
            } else if !names.contains(target) {
                errors.push(FieldError::new(
                    format!("{path}/depends_on"),
                    format!("`{target}` does not name a category"),
                ));
            }
        }

        check_categories(
            array_at(category, "sub_categories"),
            &format!("{path}/sub_categories"),
            names,
            errors,
        );
    }
}

fn array_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn str_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}
