//! Central schema registry for all Sift types.
//!
//! The `SchemaRegistry` builds JSON Schemas from sift-core types at
//! construction time using [`schemars::schema_for!`] and provides validation
//! via `jsonschema`. Tagged unions are rewritten for tag dispatch before
//! they are stored.

use std::collections::HashMap;

use schemars::schema_for;
use serde_json::Value;
use sift_core::protocol::ReviewProtocol;
use sift_core::responses::FieldError;

use crate::discriminator::resolve_tagged_unions;
use crate::nullable::resolve_nullable_options;
use crate::error::{SchemaError, ValidationErrors};

/// Central store of all JSON Schemas in the Sift system.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Value>,
}

/// Insert a schema into the map, converting the `schemars` output to a
/// `serde_json::Value` with field-level error paths restored.
macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        let mut schema = schema_for!($ty).to_value();
        refine(&mut schema);
        $map.insert($name, schema);
    };
}

/// Rewrite tagged unions and optional sections so that errors point at the
/// offending field.
fn refine(schema: &mut Value) {
    resolve_tagged_unions(schema);
    resolve_nullable_options(schema);
}

/// The review protocol schema, ready for tag-dispatched validation.
#[must_use]
pub fn protocol_schema() -> Value {
    let mut schema = schema_for!(ReviewProtocol).to_value();
    refine(&mut schema);
    schema
}

impl SchemaRegistry {
    /// Build a new registry containing the protocol, entity, and response
    /// schemas from sift-core.
    #[must_use]
    pub fn new() -> Self {
        let mut schemas = HashMap::new();

        // --- Protocol document (1) ---
        schemas.insert("review_protocol", protocol_schema());

        // --- Entity types (10) ---
        register!(schemas, "project", sift_core::entities::Project);
        register!(schemas, "project_member", sift_core::entities::ProjectMember);
        register!(schemas, "project_config", sift_core::entities::ProjectConfig);
        register!(
            schemas,
            "exclusion_criterion",
            sift_core::entities::ExclusionCriterion
        );
        register!(schemas, "screening_phase", sift_core::entities::ScreeningPhase);
        register!(schemas, "qa_template", sift_core::entities::QaTemplate);
        register!(schemas, "qa_question", sift_core::entities::QaQuestion);
        register!(schemas, "qa_option", sift_core::entities::QaOption);
        register!(schemas, "extraction_form", sift_core::entities::ExtractionForm);
        register!(
            schemas,
            "extraction_field",
            sift_core::entities::ExtractionField
        );

        // --- Flattener output (1) ---
        register!(
            schemas,
            "field_descriptor",
            sift_core::flatten::FieldDescriptor
        );

        // --- CLI response types (3) ---
        register!(
            schemas,
            "install_result",
            sift_core::responses::InstallResult
        );
        register!(schemas, "field_error", sift_core::responses::FieldError);
        register!(
            schemas,
            "project_summary",
            sift_core::responses::ProjectSummary
        );

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown,
    /// `SchemaError::Generation` if the schema does not compile, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<FieldError> = validator
            .iter_errors(instance)
            .map(|e| FieldError::new(e.instance_path.to_string(), e.to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors::new(errors).into())
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
