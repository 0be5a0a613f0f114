//! Backend collaborators and their wire schema.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` declares the collaborator traits pages and actions depend on.
//! `supabase` implements them over the hosted backend's REST surfaces, using
//! `postgrest` to build row queries and `transport` to send them. `auth`
//! holds session persistence and change notifications; `types` converts
//! snake_case rows into the typed models the rest of the app uses.

pub mod api;
pub mod auth;
pub mod error;
pub mod postgrest;
pub mod supabase;
pub mod transport;
pub mod types;
