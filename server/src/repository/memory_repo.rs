//! In-Memory Item Repository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, IdGenerator, Item, PRIORITY_IMPORTANT, PRIORITY_NORMAL};

const SAMPLE_ITEMS: &[(&str, i64)] = &[
    ("Buy milk", PRIORITY_NORMAL),
    ("Call mom", PRIORITY_IMPORTANT),
    ("Water the plants", PRIORITY_NORMAL),
];

/// Map-backed repository. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    items: RwLock<HashMap<String, Item>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a few sample items
    pub async fn seed_sample(&self, ids: &IdGenerator) {
        let mut items = self.items.write().await;
        for (text, priority) in SAMPLE_ITEMS {
            let (created_at, id) = ids.next(Utc::now());
            items.insert(
                id.clone(),
                Item::new(id, text.to_string(), *priority, created_at),
            );
        }
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }
}

#[async_trait]
impl Repository<Item> for MemoryRepository {
    async fn create(&self, entity: &Item) -> DomainResult<Item> {
        let mut items = self.items.write().await;
        if items.contains_key(&entity.id) {
            return Err(DomainError::Conflict(format!("item {} exists", entity.id)));
        }
        items.insert(entity.id.clone(), entity.clone());
        Ok(entity.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Item>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        self.items.write().await.remove(id);
        Ok(())
    }
}
