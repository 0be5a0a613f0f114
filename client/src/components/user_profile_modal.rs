//! Modal for the signed-in user's profile: display name, email, provider,
//! and sign-out.

use leptos::prelude::*;

use crate::components::modal::Modal;
use crate::net::api::{AuthApi, ProfilesApi};
use crate::net::supabase::SupabaseClient;
use crate::net::types::ProfilePatch;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::color::initial;
use crate::util::validation;

/// Confirmation shown after a successful save.
pub const PROFILE_SAVED: &str = "Profile updated successfully";

#[component]
pub fn UserProfileModal() -> impl IntoView {
    let client = expect_context::<SupabaseClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let name = RwSignal::new(auth.get_untracked().display_name());
    let saving = RwSignal::new(false);
    let message = RwSignal::new(None::<(bool, String)>);

    let close = Callback::new(move |()| ui.update(|u| u.profile_modal_open = false));

    let save_client = client.clone();
    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let Some(user_id) = auth.get_untracked().user_id() else {
            return;
        };
        let display_name = match validation::display_name(&name.get_untracked()) {
            Ok(n) => n,
            Err(e) => {
                message.set(Some((false, e.to_string())));
                return;
            }
        };
        let client = save_client.clone();
        saving.set(true);
        message.set(None);
        leptos::task::spawn_local(async move {
            let patch = ProfilePatch { display_name: Some(display_name), ..ProfilePatch::default() };
            match client.update_profile(user_id, &patch).await {
                Ok(profile) => {
                    auth.update(|a| a.profile = Some(profile));
                    message.set(Some((true, PROFILE_SAVED.to_owned())));
                }
                Err(e) => {
                    log::warn!("profile update failed: {e}");
                    message.set(Some((false, "Failed to update profile. Please try again.".to_owned())));
                }
            }
            saving.set(false);
        });
    };

    let on_sign_out = move |_| {
        let client = client.clone();
        leptos::task::spawn_local(async move {
            if let Err(e) = client.sign_out().await {
                log::warn!("sign out: {e}");
            }
            close.run(());
        });
    };

    let avatar = move || {
        let state = auth.get();
        match state.avatar_url().map(str::to_owned) {
            Some(url) => view! { <img class="profile__avatar" src=url alt=""/> }.into_any(),
            None => view! { <span class="profile__avatar profile__avatar--initial">{initial(&state.display_name())}</span> }
                .into_any(),
        }
    };
    let email = move || auth.get().user.and_then(|u| u.email).unwrap_or_default();
    let provider = move || auth.get().provider();

    view! {
        <Modal title="Your Profile" class="dialog--profile" on_close=close>
            <div class="profile__header">
                {avatar}
                <p class="dialog__hint">"Avatar is managed by your sign-in provider"</p>
            </div>
            <form class="dialog__form" on:submit=on_save>
                <label class="dialog__label">
                    "Display Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Email"</span>
                    <span class="dialog__profile-value">{email}</span>
                </div>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Sign-in Method"</span>
                    <span class="dialog__profile-value">{provider}</span>
                </div>
                <Show when=move || message.get().is_some()>
                    <p
                        class="dialog__message"
                        class:dialog__message--ok=move || message.get().is_some_and(|(ok, _)| ok)
                        class:dialog__error=move || message.get().is_some_and(|(ok, _)| !ok)
                    >
                        {move || message.get().map(|(_, text)| text).unwrap_or_default()}
                    </p>
                </Show>
                <div class="dialog__actions">
                    <button type="button" class="btn btn--danger" on:click=on_sign_out>
                        "Sign Out"
                    </button>
                    <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
