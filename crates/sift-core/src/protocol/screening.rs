use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::scalar::{Identifier, NonEmptyText};

/// How disagreeing reviewer decisions on one paper are classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConflictType {
    /// Reviewers disagree on include/exclude.
    Decision,
    /// Reviewers disagree on any criterion.
    Criteria,
}

/// How a reviewer conflict is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ConflictResolution {
    Majority,
    Unanimity,
}

/// How validation papers are assigned to reviewers.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ValidationAssignmentMode {
    #[default]
    Normal,
    Veto,
    Info,
}

impl ValidationAssignmentMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Veto => "Veto",
            Self::Info => "Info",
        }
    }
}

/// A `{ "name": ... }` entry (criteria, sources, search strategies, list values).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamedEntry {
    pub name: NonEmptyText,
}

impl NamedEntry {
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }
}

/// One declared screening phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PhaseDef {
    pub title: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extraction fields visible while screening in this phase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Identifier>>,
}

/// Screening rules: reviewer count, conflict policy, criteria and phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScreeningConfig {
    #[schemars(range(min = 1_u32, max = 4_294_967_295_u32))]
    pub review_per_paper: u32,
    pub conflict_type: ConflictType,
    pub conflict_resolution: ConflictResolution,
    #[schemars(length(min = 1))]
    pub exclusion_criteria: Vec<NamedEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_papers: Option<Vec<NamedEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_strategy: Option<Vec<NamedEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0, max = 100))]
    pub validation_percentage: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_assignment_mode: Option<ValidationAssignmentMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phases: Option<Vec<PhaseDef>>,
}

impl ScreeningConfig {
    /// Declared phases, empty when the section is absent.
    #[must_use]
    pub fn declared_phases(&self) -> &[PhaseDef] {
        self.phases.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn has_source_papers(&self) -> bool {
        self.source_papers.as_ref().is_some_and(|s| !s.is_empty())
    }

    #[must_use]
    pub fn has_search_strategy(&self) -> bool {
        self.search_strategy.as_ref().is_some_and(|s| !s.is_empty())
    }
}
