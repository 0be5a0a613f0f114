use std::cell::RefCell;

use async_trait::async_trait;
use futures::executor::block_on;
use uuid::Uuid;

use super::*;
use crate::net::types::{AppMetadata, ProfilePatch, UserMetadata};

#[derive(Default)]
struct MockProfiles {
    stored: RefCell<Option<UserProfile>>,
    created: RefCell<Vec<UserProfile>>,
    fail_get: bool,
}

#[async_trait(?Send)]
impl ProfilesApi for MockProfiles {
    async fn get_profile(&self, _id: Uuid) -> Result<Option<UserProfile>, ApiError> {
        if self.fail_get {
            return Err(ApiError::Network("offline".into()));
        }
        Ok(self.stored.borrow().clone())
    }

    async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        self.created.borrow_mut().push(profile.clone());
        Ok(profile.clone())
    }

    async fn update_profile(&self, _id: Uuid, _patch: &ProfilePatch) -> Result<UserProfile, ApiError> {
        unreachable!("profile sync never patches")
    }
}

fn user(email: Option<&str>, meta: UserMetadata, provider: Option<&str>) -> AuthUser {
    AuthUser {
        id: Uuid::new_v4(),
        email: email.map(Into::into),
        user_metadata: meta,
        app_metadata: AppMetadata { provider: provider.map(Into::into) },
    }
}

// =============================================================
// derive_profile
// =============================================================

#[test]
fn full_name_wins_over_other_names() {
    let meta = UserMetadata {
        full_name: Some("Ada Lovelace".into()),
        name: Some("ada".into()),
        preferred_username: Some("countess".into()),
        ..UserMetadata::default()
    };
    let profile = derive_profile(&user(Some("ada@example.com"), meta, Some("github")));
    assert_eq!(profile.display_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(profile.auth_provider.as_deref(), Some("github"));
}

#[test]
fn name_falls_through_blank_fields_to_username() {
    let meta = UserMetadata {
        full_name: Some("  ".into()),
        preferred_username: Some("countess".into()),
        ..UserMetadata::default()
    };
    let profile = derive_profile(&user(None, meta, None));
    assert_eq!(profile.display_name.as_deref(), Some("countess"));
}

#[test]
fn email_local_part_then_generic_fallback() {
    let from_email = derive_profile(&user(Some("grace@navy.mil"), UserMetadata::default(), None));
    assert_eq!(from_email.display_name.as_deref(), Some("grace"));

    let nothing = derive_profile(&user(None, UserMetadata::default(), None));
    assert_eq!(nothing.display_name.as_deref(), Some("User"));
}

#[test]
fn avatar_prefers_avatar_url_then_picture() {
    let both = UserMetadata {
        avatar_url: Some("https://a/1.png".into()),
        picture: Some("https://a/2.png".into()),
        ..UserMetadata::default()
    };
    assert_eq!(derive_profile(&user(None, both, None)).avatar_url.as_deref(), Some("https://a/1.png"));

    let picture = UserMetadata { picture: Some("https://a/2.png".into()), ..UserMetadata::default() };
    assert_eq!(derive_profile(&user(None, picture, None)).avatar_url.as_deref(), Some("https://a/2.png"));

    assert!(derive_profile(&user(None, UserMetadata::default(), None)).avatar_url.is_none());
}

#[test]
fn provider_defaults_to_email() {
    let profile = derive_profile(&user(Some("a@b.co"), UserMetadata::default(), None));
    assert_eq!(profile.auth_provider.as_deref(), Some(EMAIL_PROVIDER));
}

// =============================================================
// sync_profile
// =============================================================

#[test]
fn existing_profile_is_returned_untouched() {
    let u = user(Some("ada@example.com"), UserMetadata::default(), None);
    let stored = UserProfile {
        id: u.id,
        display_name: Some("Renamed".into()),
        avatar_url: None,
        auth_provider: Some("email".into()),
    };
    let api = MockProfiles { stored: RefCell::new(Some(stored.clone())), ..MockProfiles::default() };

    let profile = block_on(sync_profile(&api, &u)).expect("sync");
    assert_eq!(profile, stored);
    assert!(api.created.borrow().is_empty());
}

#[test]
fn missing_profile_is_created_from_metadata() {
    let u = user(Some("ada@example.com"), UserMetadata::default(), Some("google"));
    let api = MockProfiles::default();

    let profile = block_on(sync_profile(&api, &u)).expect("sync");
    assert_eq!(profile.id, u.id);
    assert_eq!(profile.display_name.as_deref(), Some("ada"));
    assert_eq!(api.created.borrow().len(), 1);
}

#[test]
fn lookup_failure_skips_creation() {
    let u = user(Some("ada@example.com"), UserMetadata::default(), None);
    let api = MockProfiles { fail_get: true, ..MockProfiles::default() };

    let err = block_on(sync_profile(&api, &u)).expect_err("offline");
    assert!(matches!(err, ApiError::Network(_)));
    assert!(api.created.borrow().is_empty());
}
