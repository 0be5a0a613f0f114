//! Local UI chrome state: theme, accent, and which app-level dialogs are open.
//!
//! DESIGN
//! ======
//! Keeps presentation concerns out of domain state (`topics`, `map`) so the
//! header and settings controls can evolve independently of backend data.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use crate::util::color::{COLOR_THEMES, ColorTheme};

/// Light or dark page theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Value of the `data-theme` attribute and the stored preference.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }
}

/// Accent color applied through the `data-accent` attribute.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Accent {
    #[default]
    Blue,
    Violet,
    Pink,
    Amber,
    Emerald,
    Cyan,
    Red,
    Indigo,
}

impl Accent {
    pub const ALL: [Self; 8] =
        [Self::Blue, Self::Violet, Self::Pink, Self::Amber, Self::Emerald, Self::Cyan, Self::Red, Self::Indigo];

    fn palette(self) -> &'static ColorTheme {
        &COLOR_THEMES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.palette().name
    }

    pub fn color(self) -> &'static str {
        self.palette().color
    }

    pub fn hover_color(self) -> &'static str {
        self.palette().hover_color
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == raw)
    }
}

/// UI state for theme and app-level dialogs.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub theme: Theme,
    pub accent: Accent,
    pub auth_modal_open: bool,
    pub profile_modal_open: bool,
    pub help_open: bool,
    pub settings_open: bool,
}

impl UiState {
    /// Close every app-level dialog.
    pub fn close_dialogs(&mut self) {
        self.auth_modal_open = false;
        self.profile_modal_open = false;
        self.help_open = false;
        self.settings_open = false;
    }

    pub fn any_dialog_open(&self) -> bool {
        self.auth_modal_open || self.profile_modal_open || self.help_open || self.settings_open
    }
}
