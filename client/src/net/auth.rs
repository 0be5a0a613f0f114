//! Session persistence, change notifications, and OAuth redirect parsing.
//!
//! DESIGN
//! ======
//! `SessionEvents` is a small listener hub. Each subscriber gets a
//! [`Subscription`] handle; dropping it unsubscribes, so a component that
//! stores the handle in `on_cleanup` can never leak a listener. Listeners are
//! snapshotted before dispatch so one may subscribe or drop handles from
//! inside a callback.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use super::types::Session;
use crate::util::ui_persistence;

/// `localStorage` key for the persisted session.
pub const SESSION_STORAGE_KEY: &str = "learnmap.auth.session";

/// Called with the new session (or `None` after sign-out).
pub type SessionListener = Arc<dyn Fn(Option<&Session>) + Send + Sync>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, SessionListener)>,
}

fn lock(listeners: &Mutex<Listeners>) -> MutexGuard<'_, Listeners> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fan-out of session changes to subscribed listeners.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Arc<Mutex<Listeners>>,
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents").field("listeners", &self.len()).finish()
    }
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: SessionListener) -> Subscription {
        let mut guard = lock(&self.inner);
        guard.next_id += 1;
        let id = guard.next_id;
        guard.entries.push((id, listener));
        Subscription { id, hub: Arc::downgrade(&self.inner) }
    }

    pub fn emit(&self, session: Option<&Session>) {
        let snapshot: Vec<SessionListener> = lock(&self.inner).entries.iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in snapshot {
            listener(session);
        }
    }

    pub fn len(&self) -> usize {
        lock(&self.inner).entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Live registration in a [`SessionEvents`] hub. Unsubscribes on drop.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    hub: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Explicitly end the subscription.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            lock(&hub).entries.retain(|(id, _)| *id != self.id);
        }
    }
}

// =============================================================================
// STORAGE
// =============================================================================

pub fn load_stored_session() -> Option<Session> {
    ui_persistence::load_json(SESSION_STORAGE_KEY)
}

pub fn store_session(session: Option<&Session>) {
    match session {
        Some(s) => ui_persistence::save_json(SESSION_STORAGE_KEY, s),
        None => ui_persistence::remove_key(SESSION_STORAGE_KEY),
    }
}

// =============================================================================
// OAUTH REDIRECT
// =============================================================================

/// Tokens handed back in the URL fragment after an OAuth redirect. The user
/// record is not included and must be fetched with the access token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub expires_at: Option<i64>,
}

/// What an OAuth redirect fragment carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OAuthFragment {
    Tokens(FragmentTokens),
    Error(String),
}

/// Parse `#access_token=..&refresh_token=..` (leading `#` optional).
/// Returns `None` for fragments unrelated to auth.
pub fn parse_fragment(fragment: &str) -> Option<OAuthFragment> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut expires_at = None;
    let mut error = None;
    let mut error_description = None;

    for pair in fragment.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let value = decode_component(value);
        match key {
            "access_token" => access_token = Some(value),
            "refresh_token" => refresh_token = Some(value),
            "expires_in" => expires_in = value.parse().ok(),
            "expires_at" => expires_at = value.parse().ok(),
            "error" => error = Some(value),
            "error_description" => error_description = Some(value),
            _ => {}
        }
    }

    if let Some(message) = error_description.or(error) {
        return Some(OAuthFragment::Error(message));
    }
    access_token
        .filter(|t| !t.is_empty())
        .map(|access_token| OAuthFragment::Tokens(FragmentTokens { access_token, refresh_token, expires_in, expires_at }))
}

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode a query component.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push('%');
            out.push(char::from(HEX[usize::from(byte >> 4)]));
            out.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }
    }
    out
}

/// Decode `%XX` escapes and `+` as space. Malformed escapes pass through.
pub fn decode_component(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok().and_then(|h| u8::from_str_radix(h, 16).ok());
                if let Some(b) = hex {
                    out.push(b);
                    i += 3;
                    continue;
                }
                out.push(b'%');
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
