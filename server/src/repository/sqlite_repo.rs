//! SQLite Item Repository

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::db::open_database;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, Item};

/// SQLite implementation of the item repository
pub struct SqliteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Open the database at `path` and wrap it
    pub fn open(path: &Path) -> DomainResult<Self> {
        let conn = open_database(path)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// Creation time of the newest stored item
    pub async fn latest_created_at(&self) -> DomainResult<Option<DateTime<Utc>>> {
        let conn = self.conn.lock().await;
        let millis: Option<i64> = conn
            .query_row("SELECT MAX(created_at) FROM items", [], |row| row.get(0))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(millis.and_then(DateTime::<Utc>::from_timestamp_millis))
    }
}

#[async_trait]
impl Repository<Item> for SqliteRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO items (id, text, priority, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                entity.id,
                entity.text,
                entity.priority,
                entity.created_at.timestamp_millis()
            ],
        )
        .map_err(|e| match e {
            rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
                DomainError::Conflict(format!("item {} exists", entity.id))
            }
            other => DomainError::Internal(other.to_string()),
        })?;
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Item>> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, text, priority, created_at FROM items WHERE id = ?1",
            params![id],
            row_to_item,
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, text, priority, created_at FROM items")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let rows = stmt
            .query_map([], row_to_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let mut items = Vec::new();
        for row in rows {
            items.push(row.map_err(|e| DomainError::Internal(format!("Error decoding item: {}", e)))?);
        }
        Ok(items)
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM items WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

/// Convert a database row to Item
fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    let millis: i64 = row.get(3)?;
    Ok(Item {
        id: row.get(0)?,
        text: row.get(1)?,
        priority: row.get(2)?,
        created_at: DateTime::<Utc>::from_timestamp_millis(millis).unwrap_or_default(),
    })
}
