//! Shared dialog shell: backdrop, panel, header, and Escape-to-close.

use leptos::prelude::*;

/// Backdrop plus centered panel. Clicking the backdrop or pressing Escape
/// inside the panel runs `on_close`.
#[component]
pub fn Modal(
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] subtitle: Option<Signal<String>>,
    #[prop(optional)] class: &'static str,
    on_close: Callback<()>,
    children: Children,
) -> impl IntoView {
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            ev.stop_propagation();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class=format!("dialog {class}")
                role="dialog"
                aria-modal="true"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                tabindex="0"
            >
                <div class="dialog__header">
                    <h2>{move || title.get()}</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(()) title="Close" aria-label="Close">
                        "✕"
                    </button>
                </div>
                {subtitle.map(|s| view! { <p class="dialog__subtitle">{move || s.get()}</p> })}
                {children()}
            </div>
        </div>
    }
}
