//! Dialog for creating a topic: name, description, color, visibility.

#[cfg(test)]
#[path = "new_topic_modal_test.rs"]
mod new_topic_modal_test;

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::net::types::NewTopic;
use crate::util::color::{COLOR_THEMES, ColorTheme};
use crate::util::validation::{self, ValidationError};

/// Validate the form into an insert body.
pub fn build_topic(title: &str, description: &str, theme: &ColorTheme, is_public: bool) -> Result<NewTopic, ValidationError> {
    Ok(NewTopic {
        title: validation::title(title)?,
        description: description.trim().to_owned(),
        icon_bg_color: theme.bg_color.to_owned(),
        icon_color: theme.color.to_owned(),
        is_public,
    })
}

#[component]
pub fn NewTopicModal(
    on_close: Callback<()>,
    on_submit: Callback<NewTopic>,
    #[prop(into)] busy: Signal<bool>,
) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let color = RwSignal::new(0_usize);
    let is_public = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_form_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let theme = &COLOR_THEMES[color.get_untracked() % COLOR_THEMES.len()];
        match build_topic(&title.get_untracked(), &description.get_untracked(), theme, is_public.get_untracked()) {
            Ok(topic) => {
                error.set(None);
                on_submit.run(topic);
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    view! {
        <Modal
            title="Create New Topic"
            subtitle="Add a new learning topic to your map"
            class="dialog--new-topic"
            on_close=on_close
        >
            <form class="dialog__form" on:submit=on_form_submit>
                <label class="dialog__label">
                    "Topic Name"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="e.g., Machine Learning"
                        autofocus=true
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Description"
                    <textarea
                        class="dialog__input dialog__input--multiline"
                        placeholder="Brief description of this topic..."
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <div class="dialog__label">
                    "Color Theme"
                    <div class="color-picker">
                        {COLOR_THEMES
                            .iter()
                            .enumerate()
                            .map(|(idx, theme)| {
                                view! {
                                    <button
                                        type="button"
                                        class="color-picker__swatch"
                                        class:color-picker__swatch--selected=move || color.get() == idx
                                        style=format!("background-color: {};", theme.color)
                                        title=theme.name
                                        aria-label=theme.name
                                        on:click=move |_| color.set(idx)
                                    ></button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
                <label class="dialog__checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || is_public.get()
                        on:change=move |ev| is_public.set(event_target_checked(&ev))
                    />
                    <span>"Make this topic public"</span>
                </label>
                <p class="dialog__hint">"Public topics can be viewed by anyone, even without signing in"</p>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || busy.get()>
                        "Create Topic"
                    </button>
                </div>
            </form>
        </Modal>
    }
}
