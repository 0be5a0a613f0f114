//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the app chrome, the map surface, and dialogs. Shared
//! state (auth, ui) comes from Leptos context; map rendering inputs arrive
//! as explicit props.

pub mod add_node_modal;
pub mod auth_modal;
pub mod connection_line;
pub mod delete_topic_modal;
pub mod header;
pub mod help_shortcuts_modal;
pub mod map_node;
pub mod modal;
pub mod new_topic_modal;
pub mod node_canvas;
pub mod node_details_modal;
pub mod owner_badge;
pub mod settings_modal;
pub mod topic_card;
pub mod topic_feed;
pub mod user_profile_modal;
pub mod visibility_toggle;
pub mod zoom_controls;
