use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::scalar::{Identifier, NonEmptyText};

/// Project identity section of a protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectDef {
    /// Unique human-readable key; case-folded to the project label at install.
    pub short_name: Identifier,
    /// Display title.
    pub name: NonEmptyText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
