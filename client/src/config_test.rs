use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |name| map.get(name).cloned()
}

#[test]
fn valid_config_is_accepted() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        (URL_VAR, "https://abc.supabase.co/"),
        (ANON_KEY_VAR, "anon-key"),
    ]))
    .unwrap();
    assert_eq!(cfg.supabase_url, "https://abc.supabase.co");
    assert_eq!(cfg.supabase_anon_key, "anon-key");
    assert_eq!(cfg.host(), "abc.supabase.co");
}

#[test]
fn all_missing_variables_are_reported_together() {
    let err = AppConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert_eq!(err, ConfigError::Missing(vec![URL_VAR, ANON_KEY_VAR]));
    assert_eq!(
        err.to_string(),
        "Missing required environment variables:\n  - LEARNMAP_SUPABASE_URL\n  - LEARNMAP_SUPABASE_ANON_KEY"
    );
}

#[test]
fn blank_values_count_as_missing() {
    let err = AppConfig::from_lookup(lookup_from(&[(URL_VAR, "https://x.io"), (ANON_KEY_VAR, "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing(vec![ANON_KEY_VAR]));
}

#[test]
fn url_without_scheme_is_rejected() {
    let err = AppConfig::from_lookup(lookup_from(&[(URL_VAR, "abc.supabase.co"), (ANON_KEY_VAR, "k")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidUrl { var: URL_VAR, .. }));
    assert!(err.to_string().starts_with("Invalid LEARNMAP_SUPABASE_URL URL format"));
}

#[test]
fn host_handles_paths_and_plain_http() {
    let cfg = AppConfig { supabase_url: "http://localhost:54321/base".into(), supabase_anon_key: "k".into() };
    assert_eq!(cfg.host(), "localhost:54321");
}
