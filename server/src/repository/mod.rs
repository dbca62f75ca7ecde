//! Repository Layer
//!
//! Data access abstractions and implementations:
//! - memory_repo: map-backed store, optionally seeded with sample items
//! - sqlite_repo: SQLite-backed store under the persist directory

mod db;
mod memory_repo;
mod sqlite_repo;
mod traits;


pub use db::{open_database, DATABASE_FILE};
pub use memory_repo::MemoryRepository;
pub use sqlite_repo::SqliteRepository;
pub use traits::Repository;
