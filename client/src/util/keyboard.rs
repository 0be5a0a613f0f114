//! Page-level keyboard shortcuts.
//!
//! SYSTEM CONTEXT
//! ==============
//! The home page and the canvas page both listen for shortcuts on the whole
//! document. Keydowns are normalized into a combo string by
//! `canvas::input::shortcut_combo` ("Ctrl+n" also covers Cmd+n on macOS) and
//! then matched by each page's shortcut enum.
//!
//! Plain keys typed into a text field never trigger a shortcut; modifier
//! combos and Escape still do.

#[cfg(test)]
#[path = "keyboard_test.rs"]
mod keyboard_test;

use canvas::input::{Modifiers, shortcut_combo};

/// One normalized keydown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    pub combo: String,
    /// Focus was in an input, textarea, select, or editable element.
    pub typing: bool,
}

impl KeyPress {
    pub fn new(key: &str, mods: Modifiers, is_mac: bool, typing: bool) -> Self {
        Self { combo: shortcut_combo(key, mods, is_mac), typing }
    }

    /// Combo to dispatch, or `None` when the key belongs to a text field.
    pub fn shortcut(&self) -> Option<&str> {
        if self.typing && !(self.combo.starts_with("Ctrl+") || self.combo == "Escape") {
            return None;
        }
        Some(&self.combo)
    }
}

/// Whether an element with this tag name takes typed text.
pub fn is_typing_target(tag_name: &str, content_editable: bool) -> bool {
    content_editable || matches!(tag_name.to_ascii_uppercase().as_str(), "INPUT" | "TEXTAREA" | "SELECT")
}

/// Whether a navigator platform/user-agent string is Apple's.
pub fn is_mac_platform(platform: &str) -> bool {
    let p = platform.to_ascii_lowercase();
    p.contains("mac") || p.contains("iphone") || p.contains("ipad")
}

/// Shortcuts on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeShortcut {
    NewTopic,
    FocusSearch,
    /// Close dialogs and clear the search box.
    Escape,
}

impl HomeShortcut {
    pub fn from_combo(combo: &str) -> Option<Self> {
        match combo {
            "Ctrl+n" => Some(Self::NewTopic),
            "Ctrl+k" => Some(Self::FocusSearch),
            "Escape" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[cfg(feature = "csr")]
fn is_mac() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().platform().ok())
        .is_some_and(|p| is_mac_platform(&p))
}

#[cfg(feature = "csr")]
fn typing_in(event: &web_sys::KeyboardEvent) -> bool {
    use wasm_bindgen::JsCast;

    event
        .target()
        .and_then(|t| t.dyn_into::<web_sys::HtmlElement>().ok())
        .is_some_and(|el| is_typing_target(&el.tag_name(), el.is_content_editable()))
}

/// Listen for keydowns on the document for the lifetime of the current
/// reactive owner. `handler` returns true when it consumed the key, which
/// suppresses the browser default (Ctrl+n opening a window, for one).
pub fn install_shortcuts<F>(handler: F)
where
    F: Fn(&KeyPress) -> bool + 'static,
{
    #[cfg(feature = "csr")]
    {
        use gloo_events::EventListener;
        use leptos::prelude::StoredValue;
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let mac = is_mac();
        let listener = EventListener::new(&document, "keydown", move |event| {
            let Some(event) = event.dyn_ref::<web_sys::KeyboardEvent>() else {
                return;
            };
            let mods = Modifiers {
                shift: event.shift_key(),
                ctrl: event.ctrl_key(),
                alt: event.alt_key(),
                meta: event.meta_key(),
            };
            let press = KeyPress::new(&event.key(), mods, mac, typing_in(event));
            if handler(&press) {
                event.prevent_default();
            }
        });
        // Dropped, and so detached, when the owning page is disposed.
        StoredValue::new_local(listener);
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = handler;
    }
}
