//! Storage module for persisting match graphs
//!
//! This module handles all database operations for the harvester, including:
//! - SQLite database initialization and schema management
//! - Challenge catalog deduplication
//! - Atomic persistence of one match graph per transaction
//! - Row counts for statistics

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStorage;
pub use traits::{Gateway, StorageError, StorageResult, Table};

use std::path::Path;

/// Initializes or opens a storage database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStorage)` - Successfully initialized storage
/// * `Err(StorageError)` - Failed to initialize storage
pub fn open_storage(path: &Path) -> StorageResult<SqliteStorage> {
    SqliteStorage::new(path)
}
