//! # client
//!
//! Leptos client-side-rendered frontend for the learning-map application.
//!
//! This crate contains pages, components, reactive state, the backend
//! collaborators, and browser glue. The map canvas itself (geometry, drag
//! state machine, document store, scene model) lives in the `canvas` crate;
//! the `TopicMapPage` drives it through `canvas::engine::MapCore`.
//!
//! Browser-only code is gated behind the `csr` feature. Everything else
//! compiles natively so state, request building, and orchestration are
//! tested with plain `cargo test`.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

pub use app::App;

/// Install the console logger and the panic hook. Call once at startup.
#[cfg(feature = "csr")]
pub fn init_logging() {
    // A second call finds the logger already set; nothing to do then.
    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
