//! Database Connection and Setup
//!
//! Opens the SQLite database and runs migrations.

use std::path::Path;

use rusqlite::Connection;

use crate::domain::{DomainError, DomainResult};

/// File name of the database inside the persist directory
pub const DATABASE_FILE: &str = "todo.db";

/// Open (or create) the database at `path`; `:memory:` gives a private
/// in-memory database.
pub fn open_database(path: &Path) -> DomainResult<Connection> {
    let conn = if path == Path::new(":memory:") {
        Connection::open_in_memory()
    } else {
        Connection::open(path)
    }
    .map_err(|e| DomainError::Internal(format!("Failed to open {}: {}", path.display(), e)))?;

    run_migrations(&conn)?;
    Ok(conn)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            text TEXT NOT NULL,
            priority INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_items_order ON items(priority DESC, created_at ASC);",
    )
    .map_err(|e| DomainError::Internal(format!("Failed to migrate: {}", e)))
}
