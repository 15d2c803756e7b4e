use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::scalar::Identifier;

/// Chart kind used to render a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Chart {
    Bar,
    Pie,
    Line,
}

/// A reporting definition. Never persisted as rows: reports are read back from
/// the stored protocol at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "report_type")]
pub enum Report {
    /// Distribution of one category.
    Simple(SimpleReport),
    /// One category cross-tabulated against another.
    Compared(ComparedReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleReport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Category name this report is computed from.
    pub value: Identifier,
    #[schemars(length(min = 1))]
    pub chart: Vec<Chart>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComparedReport {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub value: Identifier,
    /// Category the `value` is compared against.
    pub reference: Identifier,
    #[schemars(length(min = 1))]
    pub chart: Vec<Chart>,
}

impl Report {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple(r) => &r.name,
            Self::Compared(r) => &r.name,
        }
    }

    /// Category names referenced by this report, in declaration order.
    #[must_use]
    pub fn referenced_categories(&self) -> Vec<&Identifier> {
        match self {
            Self::Simple(r) => vec![&r.value],
            Self::Compared(r) => vec![&r.value, &r.reference],
        }
    }
}
