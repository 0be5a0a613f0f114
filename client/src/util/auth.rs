//! Keeps `AuthState` in step with the backend session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client owns the session and emits every change (sign-in, sign-out,
//! refresh, OAuth return). The app subscribes once; each change is mirrored
//! into the `RwSignal<AuthState>` every page reads, and a newly seen user gets
//! their profile fetched or provisioned.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::net::api::{AuthApi, ProfilesApi};
use crate::net::types::Session;
use crate::state::auth::AuthState;
use crate::util::profile::sync_profile;

/// Mirror `session` into `state`. Returns true when the signed-in user
/// changed and their profile should be (re)loaded.
pub fn apply_session(state: &mut AuthState, session: Option<&Session>) -> bool {
    let before = state.user_id();
    state.set_user(session.map(|s| s.user.clone()));
    let after = state.user_id();
    after.is_some() && after != before
}

/// Fetch (or create) the profile for the current user and store it.
pub fn load_profile<A>(api: A, auth: RwSignal<AuthState>)
where
    A: ProfilesApi + 'static,
{
    let Some(user) = auth.get_untracked().user else {
        return;
    };
    leptos::task::spawn_local(async move {
        match sync_profile(&api, &user).await {
            Ok(profile) => auth.update(|state| {
                // Ignore a late answer for a user who already signed out.
                if state.user_id() == Some(profile.id) {
                    state.profile = Some(profile);
                }
            }),
            Err(e) => log::warn!("profile sync for {} failed: {e}", user.id),
        }
    });
}

/// Subscribe `auth` to session changes for the lifetime of the current
/// reactive owner.
pub fn install_session_sync<A>(api: A, auth: RwSignal<AuthState>)
where
    A: AuthApi + ProfilesApi + Clone + Send + Sync + 'static,
{
    let listener_api = api.clone();
    let subscription = api.subscribe(Arc::new(move |session: Option<&Session>| {
        let mut changed = false;
        auth.update(|state| changed = apply_session(state, session));
        if changed {
            load_profile(listener_api.clone(), auth);
        }
    }));
    on_cleanup(move || subscription.unsubscribe());
}
