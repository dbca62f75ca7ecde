//! Composer Component
//!
//! New-item form: text input, priority toggle, submit icon.

use leptos::prelude::*;

use crate::context::use_app_context;
use crate::models::{NewItem, PRIORITY_HIGH, PRIORITY_NORMAL};

const NORMAL_ICON_COLOR: &str = "grey";
const HIGH_ICON_COLOR: &str = "lightsalmon";

/// Composer form state: the typed text and the priority toggle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub text: String,
    pub priority: i64,
}

impl ComposerState {
    pub fn toggle_priority(&mut self) {
        self.priority = if self.priority == PRIORITY_NORMAL {
            PRIORITY_HIGH
        } else {
            PRIORITY_NORMAL
        };
    }

    pub fn icon_color(&self) -> &'static str {
        if self.priority == PRIORITY_NORMAL {
            NORMAL_ICON_COLOR
        } else {
            HIGH_ICON_COLOR
        }
    }

    /// Empty text yields nothing and leaves the state alone. Otherwise the
    /// item to create is returned and the form resets: text cleared,
    /// priority back to normal.
    pub fn submit(&mut self) -> Option<NewItem> {
        if self.text.is_empty() {
            return None;
        }
        let item = NewItem::new(std::mem::take(&mut self.text), self.priority);
        self.priority = PRIORITY_NORMAL;
        Some(item)
    }
}

/// Form for creating new items
#[component]
pub fn Composer() -> impl IntoView {
    let ctx = use_app_context();

    let state = RwSignal::new(ComposerState::default());

    // Resets immediately; creation runs in the background.
    let submit = move || {
        if let Some(item) = state.try_update(|s| s.submit()).flatten() {
            ctx.create_item(item);
        }
    };

    view! {
        <div class="panel normalpanel">
            <div class="panel-body" id="createItemPanel">
                <form on:submit=move |ev: web_sys::SubmitEvent| {
                    ev.prevent_default();
                    submit();
                }>
                    <table {..leptos::tachys::html::attribute::custom::custom_attribute("width", "100%")}>
                        <tr>
                            <td {..leptos::tachys::html::attribute::custom::custom_attribute("width", "80%")}>
                                <input
                                    type="text"
                                    class="form-control"
                                    id="createItemText"
                                    placeholder="Create a Todo"
                                    prop:value=move || state.with(|s| s.text.clone())
                                    on:input:target=move |ev| {
                                        state.update(|s| s.text = ev.target().value())
                                    }
                                />
                            </td>
                            <td class="tdicon" {..leptos::tachys::html::attribute::custom::custom_attribute("width", "15%")}>
                                <span
                                    class="glyphicon glyphicon-exclamation-sign todoicon"
                                    style:color=move || state.with(|s| s.icon_color())
                                    on:click=move |_| state.update(|s| s.toggle_priority())
                                ></span>
                            </td>
                            <td class="tdicon" {..leptos::tachys::html::attribute::custom::custom_attribute("width", "10%")}>
                                <span
                                    class="glyphicon glyphicon-plus todoicon"
                                    on:click=move |_| submit()
                                ></span>
                            </td>
                        </tr>
                    </table>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> ComposerState {
        ComposerState {
            text: text.to_string(),
            ..ComposerState::default()
        }
    }

    #[test]
    fn test_initial_state_is_normal() {
        let state = ComposerState::default();
        assert_eq!(state.priority, PRIORITY_NORMAL);
        assert_eq!(state.icon_color(), "grey");
        assert!(state.text.is_empty());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut state = typed("call mom");
        state.toggle_priority();
        assert_eq!(state.priority, PRIORITY_HIGH);
        assert_eq!(state.icon_color(), "lightsalmon");
        state.toggle_priority();
        assert_eq!(state, typed("call mom"));
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let mut state = ComposerState::default();
        state.toggle_priority();
        assert_eq!(state.submit(), None);
        assert_eq!(state.priority, PRIORITY_HIGH);
    }

    #[test]
    fn test_submit_clears_text_and_resets_priority() {
        let mut state = typed("call mom");
        state.toggle_priority();
        let item = state.submit().unwrap();
        assert_eq!(item, NewItem::new("call mom", PRIORITY_HIGH));
        assert_eq!(state, ComposerState::default());
    }

    #[test]
    fn test_next_submit_uses_fresh_state() {
        let mut state = typed("call mom");
        state.toggle_priority();
        state.submit().unwrap();

        assert_eq!(state.submit(), None);
        state.text = "buy milk".to_string();
        let item = state.submit().unwrap();
        assert_eq!(item, NewItem::new("buy milk", PRIORITY_NORMAL));
        assert!(state.text.is_empty());
    }

    #[test]
    fn test_whitespace_text_is_submitted_verbatim() {
        assert_eq!(typed("  ").submit().unwrap().text, "  ");
    }
}
