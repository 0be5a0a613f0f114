//! Confirmation before a topic and its map are deleted.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::net::types::Topic;

#[component]
pub fn DeleteTopicModal(topic: Topic, on_close: Callback<()>, on_confirm: Callback<Topic>) -> impl IntoView {
    let title = topic.title.clone();

    view! {
        <Modal title="Delete Topic" class="dialog--danger" on_close=on_close>
            <p class="dialog__body">
                "Are you sure you want to delete "
                <strong>{title}</strong>
                "?"
            </p>
            <p class="dialog__warning">
                "All nodes and connections will be permanently deleted. This action cannot be undone."
            </p>
            <div class="dialog__actions">
                <button class="btn" on:click=move |_| on_close.run(())>
                    "Cancel"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_confirm.run(topic.clone())>
                    "Delete Topic"
                </button>
            </div>
        </Modal>
    }
}
