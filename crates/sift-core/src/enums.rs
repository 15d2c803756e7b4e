//! Storage vocabulary for Sift rows, and the total mappers from protocol
//! vocabulary.
//!
//! Storage enums serialize with the exact spellings written to the database
//! (`SCREAMING_SNAKE_CASE` for policy codes, lowercase for field kinds).
//! Every mapper is an exhaustive `match`; absent input falls back to an
//! explicit default instead of failing.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::protocol::{Category, ConflictResolution, ConflictType, DynamicList, ScalarType};

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project. Installation always creates drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Draft,
}

impl ProjectStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MemberRole
// ---------------------------------------------------------------------------

/// Role of a user within a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
}

impl MemberRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConflictMode
// ---------------------------------------------------------------------------

/// Stored classification of reviewer conflicts.
///
/// ```text
/// Decision → INCLUDE_EXCLUDE
/// Criteria → ALL_CRITERIA
/// (absent) → INCLUDE_EXCLUDE
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictMode {
    IncludeExclude,
    AllCriteria,
}

impl ConflictMode {
    /// Map the protocol conflict type to its stored code.
    #[must_use]
    pub const fn from_protocol(conflict_type: Option<ConflictType>) -> Self {
        match conflict_type {
            Some(ConflictType::Decision) | None => Self::IncludeExclude,
            Some(ConflictType::Criteria) => Self::AllCriteria,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncludeExclude => "INCLUDE_EXCLUDE",
            Self::AllCriteria => "ALL_CRITERIA",
        }
    }
}

impl fmt::Display for ConflictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResolutionRule
// ---------------------------------------------------------------------------

/// Stored rule for resolving reviewer conflicts.
///
/// ```text
/// Majority  → MAJORITY
/// Unanimity → UNANIMITY
/// (absent)  → UNANIMITY
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionRule {
    Majority,
    Unanimity,
}

impl ResolutionRule {
    /// Map the protocol conflict resolution to its stored code.
    #[must_use]
    pub const fn from_protocol(resolution: Option<ConflictResolution>) -> Self {
        match resolution {
            Some(ConflictResolution::Majority) => Self::Majority,
            Some(ConflictResolution::Unanimity) | None => Self::Unanimity,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Majority => "MAJORITY",
            Self::Unanimity => "UNANIMITY",
        }
    }
}

impl fmt::Display for ResolutionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// Stored kind of an extraction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Int,
    Text,
    String,
    Bool,
    Real,
    Date,
    List,
    DynamicList,
}

impl FieldKind {
    /// Scalar kinds pass through verbatim.
    #[must_use]
    pub const fn from_scalar(scalar: ScalarType) -> Self {
        match scalar {
            ScalarType::Int => Self::Int,
            ScalarType::Text => Self::Text,
            ScalarType::String => Self::String,
            ScalarType::Bool => Self::Bool,
            ScalarType::Real => Self::Real,
            ScalarType::Date => Self::Date,
        }
    }

    #[must_use]
    pub const fn of(category: &Category) -> Self {
        match category {
            Category::Simple(c) => Self::from_scalar(c.field_type),
            Category::List(_) => Self::List,
            Category::DynamicList(DynamicList::Independent(_) | DynamicList::Dependent(_)) => {
                Self::DynamicList
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Text => "text",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Real => "real",
            Self::Date => "date",
            Self::List => "list",
            Self::DynamicList => "dynamic_list",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Every kind of row an installation creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Project,
    ProjectMember,
    ProjectConfig,
    ExclusionCriterion,
    ScreeningPhase,
    QaTemplate,
    QaQuestion,
    QaOption,
    ExtractionForm,
    ExtractionField,
}

impl EntityType {
    pub const ALL: [Self; 10] = [
        Self::Project,
        Self::ProjectMember,
        Self::ProjectConfig,
        Self::ExclusionCriterion,
        Self::ScreeningPhase,
        Self::QaTemplate,
        Self::QaQuestion,
        Self::QaOption,
        Self::ExtractionForm,
        Self::ExtractionField,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::ProjectMember => "project_member",
            Self::ProjectConfig => "project_config",
            Self::ExclusionCriterion => "exclusion_criterion",
            Self::ScreeningPhase => "screening_phase",
            Self::QaTemplate => "qa_template",
            Self::QaQuestion => "qa_question",
            Self::QaOption => "qa_option",
            Self::ExtractionForm => "extraction_form",
            Self::ExtractionField => "extraction_field",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
