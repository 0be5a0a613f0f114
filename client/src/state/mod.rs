//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain (`auth`, `topics`, `map`, `explore`, `ui`) so individual
//! pages and components can depend on small focused models. Each model is a
//! plain struct; the app wraps it in an `RwSignal` and provides it through
//! context.

pub mod auth;
pub mod explore;
pub mod map;
pub mod optimistic;
pub mod topics;
pub mod ui;
