//! Theme and accent initialization and persistence.
//!
//! Reads the stored preferences from `localStorage` and applies `data-theme`
//! and `data-accent` attributes to the `<html>` element. Setters write back
//! and update the attribute. Requires a browser environment.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; native test
//! builds see the defaults and every write is a no-op.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use super::ui_persistence;
use crate::state::ui::{Accent, Theme};

pub const THEME_STORAGE_KEY: &str = "learnmap.theme";
pub const ACCENT_STORAGE_KEY: &str = "learnmap.accent";

/// Stored theme, or the system color-scheme preference when none is stored.
pub fn read_theme() -> Theme {
    ui_persistence::load_string(THEME_STORAGE_KEY)
        .and_then(|raw| Theme::parse(&raw))
        .unwrap_or_else(system_theme)
}

pub fn read_accent() -> Accent {
    ui_persistence::load_string(ACCENT_STORAGE_KEY).and_then(|raw| Accent::parse(&raw)).unwrap_or_default()
}

fn system_theme() -> Theme {
    #[cfg(feature = "csr")]
    {
        let prefers_dark = web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches());
        if prefers_dark {
            return Theme::Dark;
        }
    }
    Theme::Light
}

fn set_root_attribute(name: &str, value: &str) {
    #[cfg(feature = "csr")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            if let Err(e) = el.set_attribute(name, value) {
                log::warn!("theme: could not set {name}: {e:?}");
            }
        }
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (name, value);
    }
}

/// Apply both attributes without persisting.
pub fn apply(theme: Theme, accent: Accent) {
    set_root_attribute("data-theme", theme.as_str());
    set_root_attribute("data-accent", accent.name());
}

/// Persist and apply a theme.
pub fn set_theme(theme: Theme) {
    ui_persistence::save_string(THEME_STORAGE_KEY, theme.as_str());
    set_root_attribute("data-theme", theme.as_str());
}

/// Flip the theme, persist it, and return the new value.
pub fn toggle(current: Theme) -> Theme {
    let next = current.toggled();
    set_theme(next);
    next
}

pub fn set_accent(accent: Accent) {
    ui_persistence::save_string(ACCENT_STORAGE_KEY, accent.name());
    set_root_attribute("data-accent", accent.name());
}
