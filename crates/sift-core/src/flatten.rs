//! Category tree flattening.
//!
//! Walks the recursive `Category` tree in pre-order (self, then children) and
//! emits one [`FieldDescriptor`] per node. `order` is the node's index in the
//! flattened output, so ordering is monotonic across the whole tree rather
//! than restarting within each sibling set. The output vector doubles as the
//! accumulator threaded through the recursion; there is no shared counter.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::FieldConfig;
use crate::enums::FieldKind;
use crate::protocol::{Category, DynamicList, NamedEntry};

/// Storage-ready description of one category node.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub field_type: FieldKind,
    pub is_required: bool,
    /// Index of this descriptor in the flattened list.
    pub order: usize,
    /// Index of the parent descriptor, `None` for roots.
    pub parent_index: Option<usize>,
    pub config: FieldConfig,
}

impl FieldDescriptor {
    /// Name of the immediate parent category, if any.
    #[must_use]
    pub fn parent_name(&self) -> Option<&str> {
        self.config.parent.as_deref()
    }
}

/// Flatten a category forest into ordered descriptors.
#[must_use]
pub fn flatten(categories: &[Category]) -> Vec<FieldDescriptor> {
    flatten_under(categories, None)
}

/// Flatten a forest whose roots hang under an externally known parent name.
///
/// Roots get `config.parent = parent_name` but no `parent_index`, since the
/// parent is not part of the output.
#[must_use]
pub fn flatten_under(categories: &[Category], parent_name: Option<&str>) -> Vec<FieldDescriptor> {
    let total = categories.iter().map(Category::node_count).sum();
    let mut out = Vec::with_capacity(total);
    for category in categories {
        push_subtree(category, None, parent_name.map(str::to_owned), &mut out);
    }
    out
}

fn push_subtree(
    category: &Category,
    parent_index: Option<usize>,
    parent_name: Option<String>,
    out: &mut Vec<FieldDescriptor>,
) {
    let order = out.len();
    out.push(describe(category, order, parent_index, parent_name));

    for child in category.sub_categories() {
        let name = category.name().to_string();
        push_subtree(child, Some(order), Some(name), out);
    }
}

fn describe(
    category: &Category,
    order: usize,
    parent_index: Option<usize>,
    parent_name: Option<String>,
) -> FieldDescriptor {
    let mut config = FieldConfig {
        number_of_values: category.number_of_values(),
        mandatory: category.mandatory(),
        parent: parent_name,
        ..FieldConfig::default()
    };

    match category {
        Category::Simple(c) => {
            config.pattern.clone_from(&c.pattern);
            config.max_char = c.max_char;
            config.initial_value.clone_from(&c.initial_value);
        }
        Category::List(c) => {
            config.values = Some(entry_names(&c.values));
        }
        Category::DynamicList(list @ DynamicList::Independent(c)) => {
            config.dynamic_subtype = Some(list.subtype().to_string());
            config.initial_values = Some(entry_names(&c.initial_values));
            config.reference_name.clone_from(&c.reference_name);
        }
        Category::DynamicList(list @ DynamicList::Dependent(c)) => {
            config.dynamic_subtype = Some(list.subtype().to_string());
            config.depends_on = Some(c.depends_on.to_string());
        }
    }

    FieldDescriptor {
        name: category.name().to_string(),
        label: category.label().to_string(),
        field_type: FieldKind::of(category),
        is_required: category.mandatory(),
        order,
        parent_index,
        config,
    }
}

fn entry_names(entries: &[NamedEntry]) -> Vec<String> {
    entries.iter().map(|e| e.as_str().to_string()).collect()
}
