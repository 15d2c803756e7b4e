use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FieldKind;

/// The published set of fields used to extract data from included papers.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExtractionForm {
    pub id: String,
    pub project_id: String,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One node of the flattened category tree.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ExtractionField {
    pub id: String,
    pub form_id: String,
    pub name: String,
    pub label: String,
    pub field_type: FieldKind,
    pub is_required: bool,
    /// Position in the flattened (pre-order) field list.
    pub position: u32,
    pub config: FieldConfig,
    /// Row ID of the parent field for sub-categories.
    pub parent_id: Option<String>,
}

/// Variant-specific settings of an extraction field, stored as a JSON blob.
///
/// Only the keys relevant to the field's kind are present.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldConfig {
    /// Closed-list values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// `Independent` or `Dependent` for dynamic lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamic_subtype: Option<String>,
    /// Seed values of an independent dynamic list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    /// Field whose value drives a dependent dynamic list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_char: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<serde_json::Value>,
    #[serde(rename = "numberOfValues", default, skip_serializing_if = "Option::is_none")]
    pub number_of_values: Option<i64>,
    pub mandatory: bool,
    /// Name of the immediate parent category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}
