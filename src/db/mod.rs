//! SQLite-backed state for counselor name reconciliation.
//!
//! The database holds the adult roster view the matcher reads, the queue of
//! raw names awaiting manual review, the append-only reviewer decision
//! ledger, and the record of automatic matches made during import. All
//! writes are short-lived single-operation transactions; a CSV import run
//! never holds one transaction across records, so an abandoned import
//! leaves every already-recorded sighting valid.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

pub mod types;
pub use types::*;

mod decisions;
mod mappings;
mod resolution;
mod roster;
mod stats;
mod unmatched;

pub use resolution::{RejectionReason, Resolution};

pub struct MatchDb {
    conn: Connection,
}

impl MatchDb {
    /// Borrow the underlying connection for ad-hoc queries.
    pub fn conn_ref(&self) -> &Connection {
        &self.conn
    }

    /// Open (or create) a database at the given path and apply the schema.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path: PathBuf = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(DbError::CreateDir)?;
            }
        }

        let conn = Connection::open(&path)?;

        // WAL for concurrent readers while an import run writes.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        crate::migrations::run_migrations(&conn).map_err(DbError::Migration)?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(Self { conn })
    }

    /// Execute a closure within a SQLite transaction.
    /// Commits on Ok, rolls back on Err.
    pub fn with_transaction<F, T>(&self, f: F) -> Result<T, DbError>
    where
        F: FnOnce(&Self) -> Result<T, DbError>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        match f(self) {
            Ok(val) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(val)
            }
            Err(e) => {
                let _ = self.conn.execute_batch("ROLLBACK");
                Err(e)
            }
        }
    }
}

// =============================================================================
// Shared test utilities
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
