//! Data-extraction field definitions.
//!
//! `Category` is a recursive tagged union: every variant may carry
//! `sub_categories`, nesting to arbitrary depth. The discriminant is the
//! explicit `category_type` tag; dynamic lists carry a second
//! `dynamic_subtype` tag.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::screening::NamedEntry;
use super::scalar::Identifier;

/// Scalar kind of a `Simple` category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int,
    Text,
    String,
    Bool,
    Real,
    Date,
}

impl ScalarType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Text => "text",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Real => "real",
            Self::Date => "date",
        }
    }
}

/// A data-extraction field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "category_type")]
pub enum Category {
    /// Leaf scalar field.
    Simple(SimpleCategory),
    /// Closed enumeration.
    List(ListCategory),
    /// Open, user-extensible enumeration.
    DynamicList(DynamicList),
}

/// Scalar field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleCategory {
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub field_type: ScalarType,
    pub mandatory: bool,
    /// `-1` for unlimited repetitions, otherwise a cap.
    #[serde(rename = "numberOfValues", default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = -1))]
    pub number_of_values: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1_u32, max = 4_294_967_295_u32))]
    pub max_char: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_value: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub sub_categories: Option<Vec<Category>>,
}

/// Closed enumeration with at least two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ListCategory {
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[schemars(length(min = 2))]
    pub values: Vec<NamedEntry>,
    pub mandatory: bool,
    #[serde(rename = "numberOfValues", default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = -1))]
    pub number_of_values: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub sub_categories: Option<Vec<Category>>,
}

/// Open enumeration, either seeded with values or driven by another field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "dynamic_subtype")]
pub enum DynamicList {
    Independent(IndependentList),
    Dependent(DependentList),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IndependentList {
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
    #[schemars(length(min = 1))]
    pub initial_values: Vec<NamedEntry>,
    pub mandatory: bool,
    #[serde(rename = "numberOfValues", default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = -1))]
    pub number_of_values: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub sub_categories: Option<Vec<Category>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DependentList {
    pub name: Identifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Name of the category whose chosen value drives this list.
    pub depends_on: Identifier,
    pub mandatory: bool,
    #[serde(rename = "numberOfValues", default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = -1))]
    pub number_of_values: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(length(min = 1))]
    pub sub_categories: Option<Vec<Category>>,
}

impl DynamicList {
    #[must_use]
    pub const fn subtype(&self) -> &'static str {
        match self {
            Self::Independent(_) => "Independent",
            Self::Dependent(_) => "Dependent",
        }
    }
}

impl Category {
    #[must_use]
    pub const fn name(&self) -> &Identifier {
        match self {
            Self::Simple(c) => &c.name,
            Self::List(c) => &c.name,
            Self::DynamicList(DynamicList::Independent(c)) => &c.name,
            Self::DynamicList(DynamicList::Dependent(c)) => &c.name,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Simple(c) => c.title.as_deref(),
            Self::List(c) => c.title.as_deref(),
            Self::DynamicList(DynamicList::Independent(c)) => c.title.as_deref(),
            Self::DynamicList(DynamicList::Dependent(c)) => c.title.as_deref(),
        }
    }

    /// Display label: the title, or the name when no title is given.
    #[must_use]
    pub fn label(&self) -> &str {
        self.title().unwrap_or_else(|| self.name().as_str())
    }

    #[must_use]
    pub const fn mandatory(&self) -> bool {
        match self {
            Self::Simple(c) => c.mandatory,
            Self::List(c) => c.mandatory,
            Self::DynamicList(DynamicList::Independent(c)) => c.mandatory,
            Self::DynamicList(DynamicList::Dependent(c)) => c.mandatory,
        }
    }

    #[must_use]
    pub const fn number_of_values(&self) -> Option<i64> {
        match self {
            Self::Simple(c) => c.number_of_values,
            Self::List(c) => c.number_of_values,
            Self::DynamicList(DynamicList::Independent(c)) => c.number_of_values,
            Self::DynamicList(DynamicList::Dependent(c)) => c.number_of_values,
        }
    }

    /// Children of this node, empty for leaves.
    #[must_use]
    pub fn sub_categories(&self) -> &[Self] {
        let children = match self {
            Self::Simple(c) => c.sub_categories.as_deref(),
            Self::List(c) => c.sub_categories.as_deref(),
            Self::DynamicList(DynamicList::Independent(c)) => c.sub_categories.as_deref(),
            Self::DynamicList(DynamicList::Dependent(c)) => c.sub_categories.as_deref(),
        };
        children.unwrap_or_default()
    }

    /// Total number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self
            .sub_categories()
            .iter()
            .map(Self::node_count)
            .sum::<usize>()
    }
}
