//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for data access.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;

use crate::domain::{DomainResult, Entity};

/// Core repository trait. Entities are created and deleted, never edited.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Create a new entity; an existing ID is a conflict
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities, in no particular order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Delete entity by ID. Deleting an unknown ID succeeds.
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}
