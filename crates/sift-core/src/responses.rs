//! Response shapes returned to callers (CLI output, wizard backends).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Minimal handle returned by a successful installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InstallResult {
    pub project_id: String,
    pub label: String,
    pub title: String,
}

/// One validation violation, addressed by JSON Pointer into the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FieldError {
    /// JSON Pointer of the offending value, e.g. `/category/0/values`.
    /// Empty for the document root.
    pub path: String,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Row counts for one installed project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectSummary {
    pub project_id: String,
    pub label: String,
    pub title: String,
    pub status: String,
    pub screening_enabled: bool,
    pub qa_enabled: bool,
    pub extraction_enabled: bool,
    pub exclusion_criteria: u64,
    pub screening_phases: u64,
    pub qa_questions: u64,
    pub qa_options: u64,
    pub extraction_fields: u64,
    pub reports: u64,
}
