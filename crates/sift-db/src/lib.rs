//! # sift-db
//!
//! libSQL storage for Sift projects.
//!
//! Turns a validated review protocol into the full set of rows a project
//! needs (configuration, screening criteria and phases, the QA questionnaire,
//! the extraction form and its flattened fields) inside one transaction, and
//! reads them back.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) in local mode.

pub mod constraint;
pub mod error;
pub mod helpers;
mod migrations;
pub mod plan;
pub mod repos;
pub mod service;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Sift state.
pub struct SiftDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl SiftDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let sift_db = Self { db, conn };
        sift_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(sift_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }
}
