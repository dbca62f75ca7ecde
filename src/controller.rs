//! Refetch Controller
//!
//! Drives the fetch/mutate/render cycle: every successful mutation triggers a
//! full list refetch, every failure an alert. Views never await these calls;
//! the `spawn_*` methods run them on the event loop.

use std::cell::Cell;
use std::rc::Rc;

use leptos::task::spawn_local;

use crate::api::{ItemsApi, Transport};
use crate::models::{Item, NewItem};

/// Where fetched collections and failures end up
pub trait ViewSink {
    /// Replace the rendered collection
    fn show_items(&self, items: Vec<Item>);

    /// Blocking user-facing alert
    fn alert(&self, message: &str);
}

/// Sequence numbers for list fetches.
///
/// A fetch takes a ticket when issued; its response is applied only if no
/// newer fetch has been applied already, so a slow response cannot overwrite
/// a fresher collection.
#[derive(Debug, Default)]
pub struct FetchTickets {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl FetchTickets {
    pub fn issue(&self) -> u64 {
        let ticket = self.issued.get() + 1;
        self.issued.set(ticket);
        ticket
    }

    /// Returns false when a newer ticket was already applied.
    pub fn try_apply(&self, ticket: u64) -> bool {
        if ticket <= self.applied.get() {
            return false;
        }
        self.applied.set(ticket);
        true
    }
}

struct Inner<T, S> {
    api: ItemsApi<T>,
    sink: S,
    tickets: FetchTickets,
}

pub struct TodoController<T, S> {
    inner: Rc<Inner<T, S>>,
}

impl<T, S> Clone for TodoController<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Transport, S: ViewSink> TodoController<T, S> {
    pub fn new(api: ItemsApi<T>, sink: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                api,
                sink,
                tickets: FetchTickets::default(),
            }),
        }
    }

    /// Fetch the full collection and render it.
    ///
    /// On failure the rendered collection is left as it was.
    pub async fn fetch_items(&self) {
        let ticket = self.inner.tickets.issue();
        match self.inner.api.list().await {
            Ok(items) => {
                if self.inner.tickets.try_apply(ticket) {
                    log::debug!("[Items] fetch #{} rendered {} items", ticket, items.len());
                    self.inner.sink.show_items(items);
                } else {
                    log::debug!("[Items] fetch #{} superseded, dropped", ticket);
                }
            }
            Err(e) => {
                log::error!("[Items] fetch #{} failed: {}", ticket, e);
                self.inner.sink.alert(&format!("Error fetching items - {}", e));
            }
        }
    }

    pub async fn create_item(&self, item: NewItem) {
        match self.inner.api.create(&item).await {
            Ok(()) => {
                log::info!("[Items] created {:?}", item.text);
                self.fetch_items().await;
            }
            Err(e) => {
                log::error!("[Items] create failed: {}", e);
                self.inner.sink.alert(&format!("Error creating todo item - {}", e));
            }
        }
    }

    pub async fn delete_item(&self, id: String) {
        match self.inner.api.delete(&id).await {
            Ok(()) => {
                log::info!("[Items] deleted {}", id);
                self.fetch_items().await;
            }
            Err(e) => {
                log::error!("[Items] delete {} failed: {}", id, e);
                self.inner.sink.alert(&format!("Error deleting items - {}", e));
            }
        }
    }
}

impl<T: Transport + 'static, S: ViewSink + 'static> TodoController<T, S> {
    pub fn spawn_fetch(&self) {
        let this = self.clone();
        spawn_local(async move { this.fetch_items().await });
    }

    pub fn spawn_create(&self, item: NewItem) {
        let this = self.clone();
        spawn_local(async move { this.create_item(item).await });
    }

    pub fn spawn_delete(&self, id: String) {
        let this = self.clone();
        spawn_local(async move { this.delete_item(id).await });
    }
}
