//! Service layer over the Sift database.
//!
//! `SiftService` wraps `SiftDb` (raw database access) and a compiled
//! `ProtocolValidator`. All repo methods are implemented as
//! `impl SiftService` blocks under `repos/`.

use sift_schema::{ProtocolValidator, SchemaError};

use crate::SiftDb;
use crate::error::DatabaseError;

/// Orchestrates protocol validation, installation, and read-back.
///
/// Installation follows this protocol:
/// 1. Check the label is free
/// 2. Build the full row plan
/// 3. Begin transaction and insert every row
/// 4. Commit, or roll back on the first failure
pub struct SiftService {
    db: SiftDb,
    validator: ProtocolValidator,
}

impl SiftService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the
    /// protocol schema does not compile.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = SiftDb::open_local(db_path).await?;
        Self::from_db(db)
    }

    /// Create from an existing `SiftDb`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the protocol schema does not compile.
    pub fn from_db(db: SiftDb) -> Result<Self, DatabaseError> {
        let validator = ProtocolValidator::new().map_err(|e: SchemaError| {
            DatabaseError::InvalidState(format!("protocol schema: {e}"))
        })?;
        Ok(Self { db, validator })
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &SiftDb {
        &self.db
    }

    /// Access the compiled protocol validator.
    #[must_use]
    pub const fn validator(&self) -> &ProtocolValidator {
        &self.validator
    }
}
