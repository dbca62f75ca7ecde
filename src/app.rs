//! Todo App Bootstrap
//!
//! Mounts the composer and the list into their fixed mount points. Both
//! mounts hang off one root owner so they share the same context.

use leptos::mount::{mount_to, mount_to_body};
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use crate::api::{HttpTransport, ItemsApi};
use crate::components::{Composer, TodoList};
use crate::context::AppContext;
use crate::controller::TodoController;
use crate::store::{StoreSink, TodoState, TodoStore};

/// Element the composer is mounted into
pub const COMPOSER_MOUNT_ID: &str = "todonew";
/// Element the list is mounted into
pub const LIST_MOUNT_ID: &str = "todolist";

/// Backend base URL, baked in at build time. Empty means same origin.
pub fn api_base() -> &'static str {
    option_env!("TODO_API_BASE").unwrap_or("")
}

pub fn mount() {
    let owner = Owner::new();
    owner.set();

    let store = TodoStore::new(TodoState::default());
    let controller = TodoController::new(
        ItemsApi::new(HttpTransport::new(api_base())),
        StoreSink::new(store),
    );
    provide_context(AppContext::new(store, controller));
    log::info!("[App] using API base {:?}", api_base());

    mount_at(COMPOSER_MOUNT_ID, Composer);
    mount_at(LIST_MOUNT_ID, TodoList);

    // The root owner holds the shared context for the page lifetime.
    std::mem::forget(owner);
}

fn mount_at<F, N>(id: &str, view: F)
where
    F: FnOnce() -> N + 'static,
    N: IntoView,
{
    let target = document()
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
    match target {
        Some(el) => mount_to(el, view).forget(),
        None => {
            log::warn!("[App] mount point #{} not found, mounting to body", id);
            mount_to_body(view);
        }
    }
}
