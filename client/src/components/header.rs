//! Top bar shared by the list pages: brand, Explore link, theme toggle, and
//! the account button.

#[cfg(test)]
#[path = "header_test.rs"]
mod header_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::color::initial;
use crate::util::theme;

/// The Explore link is active on the explore page and on user pages.
pub fn is_explore_path(path: &str) -> bool {
    path == "/explore" || path.starts_with("/explore/") || path.starts_with("/user/")
}

/// Light/dark switch. Persists the choice.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    view! {
        <button
            class="btn header__icon-btn"
            title="Toggle dark mode"
            aria-label="Toggle dark mode"
            on:click=move |_| {
                let next = theme::toggle(ui.get_untracked().theme);
                ui.update(|u| u.theme = next);
            }
        >
            {move || if ui.get().theme.is_dark() { "☀" } else { "☾" }}
        </button>
    }
}

#[component]
pub fn Header() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let location = use_location();
    let explore_active = move || is_explore_path(&location.pathname.get());

    let on_account = move |_| {
        if auth.get_untracked().is_signed_in() {
            ui.update(|u| u.profile_modal_open = true);
        } else {
            ui.update(|u| u.auth_modal_open = true);
        }
    };

    let account_icon = move || {
        let state = auth.get();
        if let Some(url) = state.avatar_url().map(str::to_owned) {
            view! { <img class="header__avatar" src=url alt=""/> }.into_any()
        } else if state.is_signed_in() {
            view! { <span class="header__avatar header__avatar--initial">{initial(&state.display_name())}</span> }
                .into_any()
        } else {
            view! { <span class="header__avatar header__avatar--icon" aria-hidden="true">"👤"</span> }.into_any()
        }
    };
    let account_label = move || {
        let state = auth.get();
        if state.is_signed_in() { state.display_name() } else { "Sign In".to_owned() }
    };

    view! {
        <header class="header">
            <a class="header__brand" href="/">
                <span class="header__logo" aria-hidden="true">"◈"</span>
                <span class="header__titles">
                    <span class="header__title">"Learning" <span class="header__title-accent">"Map"</span></span>
                    <span class="header__subtitle">"Chart your knowledge journey"</span>
                </span>
            </a>
            <span class="header__spacer"></span>
            <nav class="header__nav">
                <a class="header__link" class:header__link--active=explore_active href="/explore">
                    "Explore"
                </a>
            </nav>
            <button
                class="btn header__icon-btn"
                title="Keyboard shortcuts"
                aria-label="Keyboard shortcuts"
                on:click=move |_| ui.update(|u| u.help_open = true)
            >
                "?"
            </button>
            <button
                class="btn header__icon-btn"
                title="Appearance"
                aria-label="Appearance"
                on:click=move |_| ui.update(|u| u.settings_open = true)
            >
                "🎨"
            </button>
            <ThemeToggle/>
            <Show when=move || !auth.get().loading>
                <button class="btn header__account" on:click=on_account>
                    {account_icon}
                    <span class="header__account-name">{account_label}</span>
                </button>
            </Show>
        </header>
    }
}
