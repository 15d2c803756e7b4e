use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Quality-assessment questionnaire attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QaTemplate {
    pub id: String,
    pub project_id: String,
    pub min_score: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct QaQuestion {
    pub id: String,
    pub template_id: String,
    pub text: String,
    pub position: u32,
}

/// A scored answer to one question. Every question carries an identical copy
/// of the shared response set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QaOption {
    pub id: String,
    pub question_id: String,
    pub title: String,
    pub score: f64,
    /// `score > 0`.
    pub is_positive: bool,
    pub position: u32,
}
