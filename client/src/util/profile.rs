//! Profile bootstrap for a freshly signed-in user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every account gets one `user_profiles` row, created lazily the first time
//! the app sees the user. Name and avatar come from whatever the sign-in
//! provider put in the user metadata.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::api::ProfilesApi;
use crate::net::error::ApiError;
use crate::net::types::{AuthUser, UserProfile};
use crate::state::auth::FALLBACK_DISPLAY_NAME;

/// Provider recorded for password accounts.
pub const EMAIL_PROVIDER: &str = "email";

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Profile row to insert for `user`.
pub fn derive_profile(user: &AuthUser) -> UserProfile {
    let meta = &user.user_metadata;
    let display_name = non_empty(meta.full_name.as_ref())
        .or_else(|| non_empty(meta.name.as_ref()))
        .or_else(|| non_empty(meta.preferred_username.as_ref()))
        .or_else(|| user.email_local_part().map(str::to_owned))
        .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_owned());
    let avatar_url = non_empty(meta.avatar_url.as_ref()).or_else(|| non_empty(meta.picture.as_ref()));
    let auth_provider = non_empty(user.app_metadata.provider.as_ref()).unwrap_or_else(|| EMAIL_PROVIDER.to_owned());

    UserProfile { id: user.id, display_name: Some(display_name), avatar_url, auth_provider: Some(auth_provider) }
}

/// Fetch `user`'s profile, creating it from provider metadata when missing.
pub async fn sync_profile<P: ProfilesApi + ?Sized>(api: &P, user: &AuthUser) -> Result<UserProfile, ApiError> {
    if let Some(existing) = api.get_profile(user.id).await? {
        return Ok(existing);
    }
    log::info!("creating profile for {}", user.id);
    api.create_profile(&derive_profile(user)).await
}
