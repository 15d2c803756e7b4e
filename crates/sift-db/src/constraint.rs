//! Constraint-violation classification.
//!
//! libSQL surfaces constraint failures as plain error messages. The label
//! pre-check before an installation is advisory; a concurrent installer can
//! still claim the label first, and the `UNIQUE` index on `projects.label`
//! then rejects our insert. These predicates recognise that case so it can
//! be reported as a conflict rather than an internal failure.

use crate::error::DatabaseError;

const LABEL_UNIQUE_VIOLATION: &str = "UNIQUE constraint failed: projects.label";

/// Detect a uniqueness violation on `projects.label`.
///
/// The predicate is intentionally narrow: other constraint failures
/// (foreign keys, checks, other unique indexes) are internal errors.
pub fn is_label_conflict(e: &DatabaseError) -> bool {
    match e {
        DatabaseError::LibSql(inner) => inner.to_string().contains(LABEL_UNIQUE_VIOLATION),
        DatabaseError::Query(msg) => msg.contains(LABEL_UNIQUE_VIOLATION),
        _ => false,
    }
}
