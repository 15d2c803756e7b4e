use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConflictMode, MemberRole, ProjectStatus, ResolutionRule};
use crate::protocol::{ReviewProtocol, ValidationAssignmentMode};

/// A systematic-review project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    /// Lowercased short name; unique across projects.
    pub label: String,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    /// User ID of the creator.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Membership of a user in a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectMember {
    pub id: String,
    pub project_id: String,
    pub user_id: String,
    pub role: MemberRole,
    pub created_at: DateTime<Utc>,
}

/// One-to-one project configuration.
///
/// Holds denormalized module toggles for the screening, QA and extraction
/// subsystems, plus the validated protocol itself as the source of truth for
/// anything not broken out into rows (notably reports).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ProjectConfig {
    pub id: String,
    pub project_id: String,
    pub screening_enabled: bool,
    pub qa_enabled: bool,
    pub extraction_enabled: bool,
    pub conflict_type: ConflictMode,
    pub conflict_resolution: ResolutionRule,
    pub review_per_paper: u32,
    pub validation_percentage: u32,
    pub validation_enabled: bool,
    pub validation_assignment_mode: ValidationAssignmentMode,
    pub source_papers_enabled: bool,
    pub search_strategy_enabled: bool,
    pub protocol: ReviewProtocol,
    pub created_at: DateTime<Utc>,
}
