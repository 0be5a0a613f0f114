//! Browser `localStorage` helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize the csr-only read/write behavior so the session
//! store and preference toggles can persist values without repeating web-sys
//! glue. Outside the browser every read misses and every write is a no-op.

#[cfg(feature = "csr")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load a JSON value from `localStorage` for `key`.
pub fn load_json<T: serde::de::DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_string(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring unreadable stored value for {key}: {e}");
            None
        }
    }
}

/// Save a JSON value to `localStorage` for `key`.
pub fn save_json<T: serde::Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => save_string(key, &raw),
        Err(e) => log::warn!("could not serialize {key}: {e}"),
    }
}

/// Load a raw string from `localStorage`.
pub fn load_string(key: &str) -> Option<String> {
    #[cfg(feature = "csr")]
    {
        storage()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
        None
    }
}

/// Save a raw string to `localStorage`.
pub fn save_string(key: &str, value: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected {key}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (key, value);
    }
}

pub fn remove_key(key: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(key);
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = key;
    }
}
