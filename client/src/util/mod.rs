//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns and backend
//! orchestration from page and component logic to improve reuse and
//! testability.

pub mod auth;
pub mod color;
pub mod keyboard;
pub mod map_actions;
pub mod notify;
pub mod pointer;
pub mod profile;
pub mod theme;
pub mod ui_persistence;
pub mod validation;
