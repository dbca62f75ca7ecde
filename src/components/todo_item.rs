//! Todo Item Component
//!
//! One entry with priority styling and a completion icon.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::Item;

/// A single item panel. Completing it deletes the item; the panel stays
/// until the following refetch lands.
#[component]
pub fn TodoItem(item: Item) -> impl IntoView {
    let ctx = use_app_context();

    let class = item.panel_class();
    let id = item.id;

    view! {
        <div class=class>
            <div class="panel-body">
                <table {..leptos::tachys::html::attribute::custom::custom_attribute("width", "100%")}>
                    <tr>
                        <td>{item.text}</td>
                        <td class="tdicon" {..leptos::tachys::html::attribute::custom::custom_attribute("width", "10%")}>
                            <span
                                class="glyphicon glyphicon-ok todoicon"
                                on:click=move |_| ctx.delete_item(id.clone())
                            ></span>
                        </td>
                    </tr>
                </table>
            </div>
        </div>
    }
}
