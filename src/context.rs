//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;

use crate::api::HttpTransport;
use crate::controller::TodoController;
use crate::models::NewItem;
use crate::store::{StoreSink, TodoStore};

pub type AppController = TodoController<HttpTransport, StoreSink>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Rendered collection
    pub store: TodoStore,
    /// Not `Send`, so it lives in local arena storage
    controller: StoredValue<AppController, LocalStorage>,
}

impl AppContext {
    pub fn new(store: TodoStore, controller: AppController) -> Self {
        Self {
            store,
            controller: StoredValue::new_local(controller),
        }
    }

    /// Refetch the full collection
    pub fn refresh(&self) {
        self.controller.with_value(|c| c.spawn_fetch());
    }

    pub fn create_item(&self, item: NewItem) {
        self.controller.with_value(|c| c.spawn_create(item));
    }

    pub fn delete_item(&self, id: String) {
        self.controller.with_value(|c| c.spawn_delete(id));
    }
}

pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
