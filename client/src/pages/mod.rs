//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod explore;
pub mod home;
pub mod not_found;
pub mod topic_map;
pub mod user_profile;
