//! Domain Layer
//!
//! Contains the item entity and its core rules.
//! This layer does no I/O.

mod entity;
mod id;
mod item;

pub use entity::{DomainError, DomainResult, Entity};
pub use id::{IdGenerator, ID_FORMAT};
pub use item::{sort_items, Item, MAX_PRIORITY, PRIORITY_IMPORTANT, PRIORITY_NORMAL};
