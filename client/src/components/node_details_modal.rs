//! Details for the selected node: read view, edit form, and delete.

#[cfg(test)]
#[path = "node_details_modal_test.rs"]
mod node_details_modal_test;

use canvas::doc::{MapNode, NodeId};
use leptos::prelude::*;

use crate::components::add_node_modal::ConnectionPicker;
use crate::components::modal::Modal;
use crate::util::map_actions::NodeEdit;

/// Subtitle under the node title.
pub fn details_subtitle(read_only: bool, editing: bool) -> &'static str {
    match (read_only, editing) {
        (true, _) => "View learning node details",
        (false, true) => "Edit your learning node",
        (false, false) => "View and edit learning node details",
    }
}

#[component]
pub fn NodeDetailsModal(
    node: MapNode,
    /// Current neighbors as `(id, title)`.
    connected: Vec<(NodeId, String)>,
    /// Every other node, for the edit picker.
    options: Vec<(NodeId, String)>,
    read_only: bool,
    #[prop(into)] busy: Signal<bool>,
    on_close: Callback<()>,
    on_save: Callback<NodeEdit>,
    on_delete: Callback<NodeId>,
) -> impl IntoView {
    let id = node.id;
    let editing = RwSignal::new(false);
    let title = RwSignal::new(node.title.clone());
    let description = RwSignal::new(node.description.clone());
    let selected = RwSignal::new(connected.iter().map(|(id, _)| *id).collect::<Vec<_>>());

    let heading = node.title.clone();
    let modal_title = Signal::derive(move || if editing.get() { "Edit Node".to_owned() } else { heading.clone() });
    let subtitle = Signal::derive(move || details_subtitle(read_only, editing.get()).to_owned());

    let notes = node.description.clone();
    let read_view = move || {
        let notes = notes.clone();
        let connected = connected.clone();
        view! {
            <div class="node-details">
                <h3 class="node-details__heading">"Learning Notes"</h3>
                {if notes.trim().is_empty() {
                    view! { <p class="node-details__empty">"No notes added yet."</p> }.into_any()
                } else {
                    view! { <p class="node-details__notes">{notes}</p> }.into_any()
                }}
                <h3 class="node-details__heading">"Connected Nodes"</h3>
                {if connected.is_empty() {
                    view! { <p class="node-details__empty">"No connections yet."</p> }.into_any()
                } else {
                    view! {
                        <ul class="node-details__connections">
                            {connected.into_iter().map(|(_, t)| view! { <li>{t}</li> }).collect_view()}
                        </ul>
                    }
                        .into_any()
                }}
            </div>
        }
    };

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        on_save.run(NodeEdit {
            title: title.get_untracked(),
            description: description.get_untracked(),
            connections: selected.get_untracked(),
        });
    };

    let edit_view = move || {
        let options = options.clone();
        view! {
            <form class="dialog__form" on:submit=on_form_submit>
                <label class="dialog__label">
                    "Title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
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
                    <button type="button" class="btn" on:click=move |_| editing.set(false)>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                        "Save Changes"
                    </button>
                </div>
            </form>
        }
    };

    view! {
        <Modal title=modal_title subtitle=subtitle class="dialog--node" on_close=on_close>
            <Show when=move || !read_only && !editing.get()>
                <div class="node-details__toolbar">
                    <button class="btn" on:click=move |_| editing.set(true)>
                        "Edit"
                    </button>
                    <button class="btn btn--danger" disabled=move || busy.get() on:click=move |_| on_delete.run(id)>
                        "Delete"
                    </button>
                </div>
            </Show>
            <Show when=move || editing.get() fallback=read_view.clone()>
                {edit_view.clone()}
            </Show>
        </Modal>
    }
}
