#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn reads_defaults_without_a_browser() {
    assert_eq!(read_theme(), Theme::Light);
    assert_eq!(read_accent(), Accent::Blue);
}

#[test]
fn toggle_flips_theme() {
    assert_eq!(toggle(Theme::Light), Theme::Dark);
    assert_eq!(toggle(Theme::Dark), Theme::Light);
}

#[test]
fn setters_are_noops_but_callable() {
    apply(Theme::Dark, Accent::Pink);
    set_theme(Theme::Dark);
    set_accent(Accent::Cyan);
}
