//! Entity structs for every row a project installation creates.
//!
//! Each entity maps to a table in the libSQL database (see
//! `sift-db/migrations/001_initial.sql`). All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for JSON output and schema export.

mod extraction;
mod project;
mod quality;
mod screening;

pub use extraction::{ExtractionField, ExtractionForm, FieldConfig};
pub use project::{Project, ProjectConfig, ProjectMember};
pub use quality::{QaOption, QaQuestion, QaTemplate};
pub use screening::{ExclusionCriterion, ScreeningPhase};
