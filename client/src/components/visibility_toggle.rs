//! Public/private switch for a topic.

use leptos::prelude::*;

/// Shows the current visibility and requests the opposite on click.
#[component]
pub fn VisibilityToggle(is_public: bool, #[prop(optional)] disabled: bool, on_toggle: Callback<bool>) -> impl IntoView {
    let (label, title) = if is_public {
        ("Public", "Public: anyone can view this topic. Click to make private.")
    } else {
        ("Private", "Private: only you can view this topic. Click to make public.")
    };

    view! {
        <button
            class="visibility-toggle"
            class:visibility-toggle--public=is_public
            disabled=disabled
            title=title
            aria-pressed=if is_public { "true" } else { "false" }
            on:click=move |ev: leptos::ev::MouseEvent| {
                ev.prevent_default();
                ev.stop_propagation();
                on_toggle.run(!is_public);
            }
        >
            <span class="visibility-toggle__icon" aria-hidden="true">{if is_public { "🌐" } else { "🔒" }}</span>
            <span class="visibility-toggle__label">{label}</span>
        </button>
    }
}
