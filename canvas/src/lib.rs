//! Node-graph canvas core for the learning-map client.
//!
//! This crate holds everything about the map canvas that does not need a
//! browser: edge geometry, the drag gesture state machine, the in-memory
//! node/connection store, the render scene model, and the orchestration core
//! the canvas page drives. The Leptos `client` crate owns the DOM and the
//! network; it feeds pointer and keyboard input in here and turns the returned
//! [`engine::Action`]s into collaborator calls.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | [`engine::MapCore`]: zoom, selection, modals, drag commits, shortcuts |
//! | [`doc`] | Nodes, connections, adjacency queries, connection-set diffing |
//! | [`camera`] | Points and the stepped zoom level |
//! | [`input`] | Pointer normalization, the draggable primitive, keyboard shortcuts |
//! | [`edge`] | Bezier edge geometry and arrowheads |
//! | [`render`] | Scene model consumed by the DOM renderer, with an edge memo cache |
//! | [`consts`] | Shared numeric constants (node anchor, curve limits, zoom bounds) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod edge;
pub mod engine;
pub mod input;
pub mod render;
