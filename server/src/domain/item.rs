//! Item Entity
//!
//! A todo entry: text plus a priority flag.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainError, DomainResult, Entity};

pub const PRIORITY_NORMAL: i64 = 0;
pub const PRIORITY_IMPORTANT: i64 = 1;
pub const MAX_PRIORITY: i64 = PRIORITY_IMPORTANT;

/// A todo item.
///
/// Wire format is `{"ID", "Text", "Priority"}`; lowercase keys are accepted
/// on input. Missing fields decode to their zero values; the creation time
/// never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Item {
    /// Unique identifier, derived from the creation time
    #[serde(rename = "ID", alias = "id", alias = "Id", default)]
    pub id: String,
    /// Item text content
    #[serde(alias = "text", default)]
    pub text: String,
    /// 0 = normal, 1 = important
    #[serde(alias = "priority", default)]
    pub priority: i64,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn new(id: String, text: String, priority: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            priority,
            created_at,
        }
    }

    /// Rejects an unset creation time and out-of-range priorities.
    pub fn check(&self) -> DomainResult<()> {
        if self.created_at == DateTime::<Utc>::UNIX_EPOCH {
            return Err(DomainError::InvalidInput("zero time not allowed".to_string()));
        }
        if !(PRIORITY_NORMAL..=MAX_PRIORITY).contains(&self.priority) {
            return Err(DomainError::InvalidInput(format!(
                "bad priority: {}",
                self.priority
            )));
        }
        Ok(())
    }
}

impl Entity for Item {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Higher priority first, then oldest first.
pub fn sort_items(items: &mut [Item]) {
    items.sort_by(|a, b| match b.priority.cmp(&a.priority) {
        Ordering::Equal => a.created_at.cmp(&b.created_at),
        other => other,
    });
}
