//! Dialog for adding a node to the open topic, optionally connected to
//! existing nodes.

#[cfg(test)]
#[path = "add_node_modal_test.rs"]
mod add_node_modal_test;

use canvas::doc::NodeId;
use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::util::map_actions::NodeDraft;

/// Check or uncheck `id` in a picker selection, keeping click order.
pub fn toggle_id(ids: &mut Vec<NodeId>, id: NodeId, checked: bool) {
    if checked {
        if !ids.contains(&id) {
            ids.push(id);
        }
    } else {
        ids.retain(|other| *other != id);
    }
}

/// Checkbox list of nodes to connect to.
#[component]
pub fn ConnectionPicker(options: Vec<(NodeId, String)>, selected: RwSignal<Vec<NodeId>>) -> impl IntoView {
    if options.is_empty() {
        return view! { <p class="dialog__hint">"No other nodes available to connect."</p> }.into_any();
    }
    view! {
        <div class="connection-picker">
            {options
                .into_iter()
                .map(|(id, title)| {
                    view! {
                        <label class="connection-picker__option">
                            <input
                                type="checkbox"
                                prop:checked=move || selected.with(|s| s.contains(&id))
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    selected.update(|s| toggle_id(s, id, checked));
                                }
                            />
                            <span>{title}</span>
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
    .into_any()
}

#[component]
pub fn AddNodeModal(
    topic_title: String,
    /// `(background, foreground)` topic colors for the badge.
    colors: (String, String),
    options: Vec<(NodeId, String)>,
    #[prop(into)] busy: Signal<bool>,
    on_close: Callback<()>,
    on_submit: Callback<NodeDraft>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let selected = RwSignal::new(Vec::<NodeId>::new());
    let (bg, fg) = colors;

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() || title.with_untracked(|t| t.trim().is_empty()) {
            return;
        }
        on_submit.run(NodeDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            connect_to: selected.get_untracked(),
        });
    };

    view! {
        <Modal title="Add Node" subtitle="Add a new learning node to your topic" class="dialog--node" on_close=on_close>
            <span class="topic-badge" style=format!("background-color: {bg}; color: {fg};")>{topic_title}</span>
            <form class="dialog__form" on:submit=on_form_submit>
                <input
                    class="dialog__input dialog__input--title"
                    type="text"
                    placeholder="Node title"
                    autofocus=true
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
                <label class="dialog__label">
                    "Learning Notes"
                    <textarea
                        class="dialog__input dialog__input--multiline"
                        placeholder="What did you learn?"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="dialog__label">
                    "Connected Nodes"
                    <ConnectionPicker options=options selected=selected/>
                </div>
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button
                        type="submit"
                        class="btn btn--primary"
                        disabled=move || busy.get() || title.with(|t| t.trim().is_empty())
                    >
                        "Save Changes"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
