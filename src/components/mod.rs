//! UI Components
//!
//! Leptos components for the composer and the item list.

mod composer;
mod todo_item;
mod todo_list;

pub use composer::Composer;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
