//! Root application component with routing and context providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` validates the build configuration, creates the backend client, and
//! provides it with the shared state signals to every page. Startup restores
//! the session (an OAuth redirect fragment first, then local storage) while
//! the router renders; pages read `AuthState::loading` to wait for it.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_modal::AuthModal;
use crate::components::help_shortcuts_modal::HelpShortcutsModal;
use crate::components::settings_modal::SettingsModal;
use crate::components::user_profile_modal::UserProfileModal;
use crate::config::{AppConfig, ConfigError};
use crate::net::supabase::SupabaseClient;
use crate::pages::{
    explore::ExplorePage, home::HomePage, not_found::NotFoundPage, topic_map::TopicMapPage,
    user_profile::UserProfilePage,
};
use crate::state::{auth::AuthState, topics::TopicsState, ui::UiState};
use crate::util::auth::{apply_session, install_session_sync, load_profile};
use crate::util::theme;

/// Root application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    match AppConfig::from_build_env() {
        Ok(config) => view! { <ConfiguredApp config=config/> }.into_any(),
        Err(e) => {
            log::error!("configuration error: {e}");
            view! { <ConfigErrorPage error=e/> }.into_any()
        }
    }
}

/// Shown instead of the app when required build variables are missing.
#[component]
fn ConfigErrorPage(error: ConfigError) -> impl IntoView {
    view! {
        <Title text="Configuration Error"/>
        <div class="config-error">
            <h1 class="config-error__title">"Configuration Error"</h1>
            <pre class="config-error__detail">{error.to_string()}</pre>
            <p class="config-error__hint">
                "Set the variables at build time and rebuild the app."
            </p>
        </div>
    }
}

/// Provides all shared state contexts and sets up client-side routing.
#[component]
fn ConfiguredApp(config: AppConfig) -> impl IntoView {
    log::info!("backend: {}", config.host());
    let client = SupabaseClient::new(&config);

    let auth = RwSignal::new(AuthState::default());
    let topics = RwSignal::new(TopicsState::default());
    let ui = RwSignal::new(UiState { theme: theme::read_theme(), accent: theme::read_accent(), ..UiState::default() });
    theme::apply(ui.get_untracked().theme, ui.get_untracked().accent);

    provide_context(client.clone());
    provide_context(auth);
    provide_context(topics);
    provide_context(ui);

    install_session_sync(client.clone(), auth);
    restore_session(client, auth);

    view! {
        <Title text="Learning Map"/>
        <Router>
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("topic"), ParamSegment("id")) view=TopicMapPage/>
                <Route path=StaticSegment("explore") view=ExplorePage/>
                <Route path=(StaticSegment("user"), ParamSegment("id")) view=UserProfilePage/>
            </Routes>
        </Router>
        <DialogHost/>
    }
}

/// App-level dialogs, opened through `UiState` flags.
#[component]
fn DialogHost() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    view! {
        <Show when=move || ui.with(|u| u.auth_modal_open)>
            <AuthModal/>
        </Show>
        <Show when=move || ui.with(|u| u.profile_modal_open)>
            <UserProfileModal/>
        </Show>
        <Show when=move || ui.with(|u| u.help_open)>
            <HelpShortcutsModal/>
        </Show>
        <Show when=move || ui.with(|u| u.settings_open)>
            <SettingsModal/>
        </Show>
    }
}

/// The URL fragment, which carries OAuth tokens after a provider redirect.
fn take_url_fragment() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        let window = web_sys::window()?;
        let hash = window.location().hash().ok().filter(|h| h.len() > 1)?;
        // Keep tokens out of the address bar and history.
        let location = window.location();
        let clean = format!("{}{}", location.pathname().unwrap_or_default(), location.search().unwrap_or_default());
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&clean));
        }
        Some(hash)
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn restore_session(client: SupabaseClient, auth: RwSignal<AuthState>) {
    let fragment = take_url_fragment();
    leptos::task::spawn_local(async move {
        let session = match client.restore_session(fragment.as_deref()).await {
            Ok(session) => session,
            Err(e) => {
                log::warn!("auth: session restore failed: {e}");
                None
            }
        };
        let mut changed = false;
        auth.update(|state| changed = apply_session(state, session.as_ref()));
        if changed {
            load_profile(client, auth);
        }
        match auth.with_untracked(AuthState::user_id) {
            Some(id) => log::info!("auth: signed in as {id}"),
            None => log::info!("auth: browsing as visitor"),
        }
    });
}
