//! Todo List Component
//!
//! Renders the fetched collection in server order.

use leptos::prelude::*;

use crate::components::TodoItem;
use crate::context::use_app_context;
use crate::store::store_items;

/// Item list keyed by ID. Mounting it triggers the initial fetch.
#[component]
pub fn TodoList() -> impl IntoView {
    let ctx = use_app_context();
    let store = ctx.store;

    // No tracked reads: runs once, after mount
    Effect::new(move |_| ctx.refresh());

    view! {
        <div class="todo-list">
            <For
                each=move || store_items(&store)
                key=|item| item.id.clone()
                let:item
            >
                <TodoItem item=item />
            </For>
        </div>
    }
}
