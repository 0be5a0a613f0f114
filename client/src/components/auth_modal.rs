//! Sign-in / sign-up dialog with email credentials and OAuth providers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Visitors open this from the header. A successful sign-in updates the
//! client session; the session subscription installed by the app mirrors it
//! into `AuthState`, so the dialog only has to close itself. OAuth leaves the
//! page and comes back with tokens in the URL fragment.

#[cfg(test)]
#[path = "auth_modal_test.rs"]
mod auth_modal_test;

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::net::api::AuthApi;
use crate::net::supabase::SupabaseClient;
use crate::net::types::OAuthProvider;
use crate::state::ui::UiState;
use crate::util::validation;

/// Which credential flow the dialog is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::SignUp,
            Self::SignUp => Self::SignIn,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::SignIn => "Owner Sign In",
            Self::SignUp => "Create Account",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in to access owner mode and manage your knowledge map",
            Self::SignUp => "Create an account to start mapping your learning",
        }
    }

    /// Submit button label, busy or idle.
    pub fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::SignIn, true) => "Signing in...",
            (Self::SignIn, false) => "Sign In",
            (Self::SignUp, true) => "Creating account...",
            (Self::SignUp, false) => "Sign Up",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            Self::SignIn => "Don't have an account? Sign up",
            Self::SignUp => "Already have an account? Sign in",
        }
    }
}

/// Shown after sign-up when the backend wants the address confirmed first.
pub const CONFIRM_EMAIL_NOTICE: &str = "Check your email to confirm your account, then sign in.";

#[component]
pub fn AuthModal() -> impl IntoView {
    let client = expect_context::<SupabaseClient>();
    let ui = expect_context::<RwSignal<UiState>>();

    let mode = RwSignal::new(AuthMode::default());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);

    let close = Callback::new(move |()| ui.update(|u| u.auth_modal_open = false));

    let submit_client = client.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let address = match validation::credentials(&email.get_untracked(), &password.get_untracked()) {
            Ok(address) => address,
            Err(e) => {
                error.set(Some(e.to_string()));
                return;
            }
        };
        let secret = password.get_untracked();
        let current = mode.get_untracked();
        let client = submit_client.clone();
        busy.set(true);
        error.set(None);
        notice.set(None);
        leptos::task::spawn_local(async move {
            let outcome = match current {
                AuthMode::SignIn => client.sign_in(&address, &secret).await.map(Some),
                AuthMode::SignUp => client.sign_up(&address, &secret).await,
            };
            busy.set(false);
            match outcome {
                Ok(Some(_)) => close.run(()),
                Ok(None) => {
                    notice.set(Some(CONFIRM_EMAIL_NOTICE.to_owned()));
                    mode.set(AuthMode::SignIn);
                }
                Err(e) => {
                    log::warn!("auth: {current:?} failed: {e}");
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    let oauth_client = client.clone();
    let start_oauth = move |provider: OAuthProvider| {
        let url = oauth_client.oauth_url(provider, &current_location());
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window()
                && let Err(e) = window.location().set_href(&url)
            {
                log::error!("auth: could not start {} sign-in: {e:?}", provider.as_str());
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (url, provider);
        }
    };
    let google = start_oauth.clone();
    let github = start_oauth;

    view! {
        <Modal
            title=Signal::derive(move || mode.get().title().to_owned())
            subtitle=Signal::derive(move || mode.get().subtitle().to_owned())
            class="dialog--auth"
            on_close=close
        >
            <form class="dialog__form" on:submit=on_submit>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        autocomplete="email"
                        placeholder="you@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Password"
                    <input
                        class="dialog__input"
                        type="password"
                        autocomplete=move || if mode.get() == AuthMode::SignIn { "current-password" } else { "new-password" }
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || error.get().is_some()>
                    <p class="dialog__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <Show when=move || notice.get().is_some()>
                    <p class="dialog__notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <button type="submit" class="btn btn--primary btn--block" disabled=move || busy.get()>
                    {move || mode.get().submit_label(busy.get())}
                </button>
            </form>
            <div class="dialog__divider">"or"</div>
            <div class="dialog__oauth">
                <button class="btn btn--oauth" on:click=move |_| google(OAuthProvider::Google)>
                    "Continue with Google"
                </button>
                <button class="btn btn--oauth" on:click=move |_| github(OAuthProvider::GitHub)>
                    "Continue with GitHub"
                </button>
            </div>
            <button
                class="dialog__switch"
                on:click=move |_| {
                    mode.update(|m| *m = m.toggled());
                    error.set(None);
                }
            >
                {move || mode.get().switch_prompt()}
            </button>
        </Modal>
    }
}

/// Where OAuth should send the user back to.
fn current_location() -> String {
    #[cfg(feature = "csr")]
    {
        web_sys::window()
            .and_then(|w| {
                let location = w.location();
                Some(format!("{}{}", location.origin().ok()?, location.pathname().ok()?))
            })
            .unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        String::new()
    }
}
