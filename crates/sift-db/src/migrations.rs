//! Schema migrations, embedded at compile time and applied on open.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so reapplying a migration
//! to an existing database changes nothing.

use crate::SiftDb;
use crate::error::DatabaseError;

/// Ordered `(name, sql)` pairs.
const MIGRATIONS: &[(&str, &str)] = &[(
    "001_initial",
    include_str!("../migrations/001_initial.sql"),
)];

impl SiftDb {
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        for (name, sql) in MIGRATIONS {
            self.conn
                .execute_batch(sql)
                .await
                .map_err(|e| DatabaseError::Migration(format!("{name}: {e}")))?;
            tracing::debug!(migration = name, "migration applied");
        }
        Ok(())
    }
}
