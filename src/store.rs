//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::controller::ViewSink;
use crate::models::Item;

/// Client-side state. Nothing here is authoritative: `items` is whatever the
/// last applied fetch returned.
#[derive(Clone, Debug, Default, Store)]
pub struct TodoState {
    /// Items in server order
    pub items: Vec<Item>,
}

/// Type alias for the store
pub type TodoStore = Store<TodoState>;

// ========================
// Store Helper Functions
// ========================

/// Tracked read of the rendered items
pub fn store_items(store: &TodoStore) -> Vec<Item> {
    store.items().get()
}

/// Replace the rendered items
pub fn store_set_items(store: &TodoStore, items: Vec<Item>) {
    store.items().set(items);
}

/// [`ViewSink`] that renders into the store and alerts through the window
#[derive(Clone, Copy)]
pub struct StoreSink {
    store: TodoStore,
}

impl StoreSink {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }
}

impl ViewSink for StoreSink {
    fn show_items(&self, items: Vec<Item>) {
        store_set_items(&self.store, items);
    }

    fn alert(&self, message: &str) {
        let _ = window().alert_with_message(message);
    }
}
