//! Values the CLI substitutes into incomplete protocols (`install --with-defaults`).
//!
//! Installation itself never fills gaps; these apply only when the caller
//! asks for them before validation.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const SCALAR_TYPES: &[&str] = &["int", "text", "string", "bool", "real", "date"];

fn default_criterion() -> String {
    "Out of scope".to_string()
}

/// The extraction field added when a protocol declares no categories.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultField {
    pub name: String,
    pub title: String,
    /// One of `int`, `text`, `string`, `bool`, `real`, `date`.
    #[serde(rename = "type")]
    pub field_type: String,
}

impl Default for DefaultField {
    fn default() -> Self {
        Self {
            name: "notes".to_string(),
            title: "Notes".to_string(),
            field_type: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DefaultsConfig {
    #[serde(default)]
    pub extraction_field: DefaultField,

    /// Criterion added when screening lists none.
    #[serde(default = "default_criterion")]
    pub exclusion_criterion: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            extraction_field: DefaultField::default(),
            exclusion_criterion: default_criterion(),
        }
    }
}

impl DefaultsConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.extraction_field;
        let mut chars = field.name.chars();
        let is_identifier = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !is_identifier {
            return Err(ConfigError::invalid(
                "defaults.extraction_field.name",
                format!("`{}` is not an identifier", field.name),
            ));
        }
        if !SCALAR_TYPES.contains(&field.field_type.as_str()) {
            return Err(ConfigError::invalid(
                "defaults.extraction_field.type",
                format!("expected one of {}", SCALAR_TYPES.join(", ")),
            ));
        }
        if self.exclusion_criterion.trim().is_empty() {
            return Err(ConfigError::invalid(
                "defaults.exclusion_criterion",
                "must not be empty",
            ));
        }
        Ok(())
    }
}
