//! The review protocol document.
//!
//! A protocol is the single structured document a research team writes to
//! describe a systematic-review project. It is validated by `sift-schema`
//! and installed by `sift-db`. Field names and enum spellings are a stable
//! wire format shared by the web wizard and the CLI.

mod category;
mod project;
mod quality;
mod report;
mod scalar;
mod screening;

pub use category::{
    Category, DependentList, DynamicList, IndependentList, ListCategory, ScalarType,
    SimpleCategory,
};
pub use project::ProjectDef;
pub use quality::{QaConfig, QaResponse};
pub use report::{Chart, ComparedReport, Report, SimpleReport};
pub use scalar::{IDENTIFIER_PATTERN, Identifier, NonEmptyText};
pub use screening::{
    ConflictResolution, ConflictType, NamedEntry, PhaseDef, ScreeningConfig,
    ValidationAssignmentMode,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Root of a protocol document. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReviewProtocol {
    pub project: ProjectDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screening: Option<ScreeningConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_assess: Option<QaConfig>,
    #[schemars(length(min = 1))]
    pub category: Vec<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting: Option<Vec<Report>>,
}

impl ReviewProtocol {
    /// The project label: the short name case-folded to lowercase.
    #[must_use]
    pub fn label(&self) -> String {
        self.project.short_name.as_str().to_lowercase()
    }

    #[must_use]
    pub const fn screening_enabled(&self) -> bool {
        self.screening.is_some()
    }

    #[must_use]
    pub const fn qa_enabled(&self) -> bool {
        self.quality_assess.is_some()
    }

    #[must_use]
    pub const fn extraction_enabled(&self) -> bool {
        !self.category.is_empty()
    }

    /// Declared reports, empty when the section is absent.
    #[must_use]
    pub fn reports(&self) -> &[Report] {
        self.reporting.as_deref().unwrap_or_default()
    }

    /// Every category name in the tree, in pre-order.
    #[must_use]
    pub fn category_names(&self) -> Vec<&Identifier> {
        fn collect<'a>(categories: &'a [Category], out: &mut Vec<&'a Identifier>) {
            for category in categories {
                out.push(category.name());
                collect(category.sub_categories(), out);
            }
        }

        let mut names = Vec::new();
        collect(&self.category, &mut names);
        names
    }
}
