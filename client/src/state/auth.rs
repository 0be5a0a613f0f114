//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the header, the home page, and the canvas page to decide between
//! signed-in and visitor rendering. The session itself lives in the backend
//! client; this model mirrors the parts the UI reads.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use uuid::Uuid;

use crate::net::types::{AuthUser, UserProfile, provider_label};

/// Fallback display name when neither profile nor email gives one.
pub const FALLBACK_DISPLAY_NAME: &str = "User";

/// Authentication state tracking the current user, their profile, and
/// whether the initial session check is still running.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub profile: Option<UserProfile>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, profile: None, loading: true }
    }
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user.as_ref().map(|u| u.id)
    }

    /// Visitor mode: signed out, or looking at someone else's topic.
    /// `owner = None` asks about the signed-in state alone.
    pub fn is_visitor_for(&self, owner: Option<Uuid>) -> bool {
        match (self.user_id(), owner) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(me), Some(owner)) => me != owner,
        }
    }

    /// Profile name, then email local part, then a generic fallback.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|p| p.display_name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| self.user.as_ref().and_then(AuthUser::email_local_part).map(str::to_owned))
            .unwrap_or_else(|| FALLBACK_DISPLAY_NAME.to_owned())
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.avatar_url.as_deref()).filter(|_| self.is_signed_in())
    }

    /// "Google", "GitHub", or "Email".
    pub fn provider(&self) -> &'static str {
        let stored = self.profile.as_ref().and_then(|p| p.auth_provider.as_deref());
        let from_user = self.user.as_ref().and_then(|u| u.app_metadata.provider.as_deref());
        provider_label(stored.or(from_user))
    }

    /// Apply a session change. A different user drops the cached profile.
    pub fn set_user(&mut self, user: Option<AuthUser>) {
        if self.user_id() != user.as_ref().map(|u| u.id) {
            self.profile = None;
        }
        self.user = user;
        self.loading = false;
    }
}
