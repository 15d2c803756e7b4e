//! ID prefixes and generation.
//!
//! Every row id is `{prefix}-{16 hex chars}`, e.g. `prj-3fa9c2017be4d810`.
//! IDs are generated up front so an install plan is complete before any
//! statement runs.

use crate::errors::CoreError;

pub const PREFIX_PROJECT: &str = "prj";
pub const PREFIX_MEMBER: &str = "mbr";
pub const PREFIX_CONFIG: &str = "cfg";
pub const PREFIX_CRITERION: &str = "exc";
pub const PREFIX_PHASE: &str = "phs";
pub const PREFIX_QA_TEMPLATE: &str = "qat";
pub const PREFIX_QA_QUESTION: &str = "qaq";
pub const PREFIX_QA_OPTION: &str = "qao";
pub const PREFIX_FORM: &str = "frm";
pub const PREFIX_FIELD: &str = "fld";

pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_PROJECT,
    PREFIX_MEMBER,
    PREFIX_CONFIG,
    PREFIX_CRITERION,
    PREFIX_PHASE,
    PREFIX_QA_TEMPLATE,
    PREFIX_QA_QUESTION,
    PREFIX_QA_OPTION,
    PREFIX_FORM,
    PREFIX_FIELD,
];

/// Generate a prefixed random ID.
///
/// # Errors
///
/// Returns `CoreError::Other` if the operating system random source fails.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::fill(&mut bytes)
        .map_err(|e| CoreError::Other(anyhow::anyhow!("random source unavailable: {e}")))?;
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    Ok(format!("{prefix}-{hex}"))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_id_has_prefix_and_hex_suffix() {
        let id = generate_id(PREFIX_FIELD).unwrap();
        assert!(id.starts_with("fld-"), "unexpected id: {id}");
        assert_eq!(id.len(), 20, "3 prefix + 1 dash + 16 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut ids = HashSet::new();
        for _ in 0..500 {
            assert!(ids.insert(generate_id(PREFIX_QA_OPTION).unwrap()));
        }
    }

    #[test]
    fn prefixes_are_distinct() {
        let unique: HashSet<_> = ALL_PREFIXES.iter().collect();
        assert_eq!(unique.len(), ALL_PREFIXES.len());
    }
}
