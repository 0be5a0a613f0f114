//! Build-time application configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend URL and public anon key are baked in at compile time through
//! `option_env!`. Validation happens once at startup; a failure renders a
//! full-page configuration error instead of the app.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const URL_VAR: &str = "LEARNMAP_SUPABASE_URL";
pub const ANON_KEY_VAR: &str = "LEARNMAP_SUPABASE_ANON_KEY";

/// Why the configuration could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables:\n{}", bullet_list(.0))]
    Missing(Vec<&'static str>),
    #[error("Invalid {var} URL format: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

fn bullet_list(names: &[&'static str]) -> String {
    names.iter().map(|n| format!("  - {n}")).collect::<Vec<_>>().join("\n")
}

/// Validated backend coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL without a trailing slash.
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl AppConfig {
    /// Build from a variable lookup. Every missing variable is reported, not
    /// just the first; blank values count as missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::InvalidUrl`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let url = read(URL_VAR);
        let key = read(ANON_KEY_VAR);

        let missing: Vec<&'static str> = [(URL_VAR, url.is_none()), (ANON_KEY_VAR, key.is_none())]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
        let (Some(url), Some(key)) = (url, key) else {
            return Err(ConfigError::Missing(missing));
        };

        if !url.starts_with("http") {
            return Err(ConfigError::InvalidUrl { var: URL_VAR, value: url });
        }

        Ok(Self { supabase_url: url.trim_end_matches('/').to_owned(), supabase_anon_key: key })
    }

    /// Read the values compiled into this build.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            match name {
                URL_VAR => option_env!("LEARNMAP_SUPABASE_URL"),
                ANON_KEY_VAR => option_env!("LEARNMAP_SUPABASE_ANON_KEY"),
                _ => None,
            }
            .map(str::to_owned)
        })
    }

    /// Host part of the backend URL, for startup logging.
    pub fn host(&self) -> &str {
        let rest = self.supabase_url.split_once("://").map_or(self.supabase_url.as_str(), |(_, r)| r);
        rest.split('/').next().unwrap_or(rest)
    }
}
