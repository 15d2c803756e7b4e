use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An exclusion criterion reviewers can cite when excluding a paper.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ExclusionCriterion {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}

/// An ordered stage of paper inclusion/exclusion review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ScreeningPhase {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    /// Extraction field names visible during this phase. `None` shows all.
    pub fields: Option<Vec<String>>,
    pub position: u32,
    pub created_at: DateTime<Utc>,
}
