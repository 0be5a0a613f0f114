//! Canvas page core: the synchronous half of topic-map orchestration.
//!
//! `MapCore` owns the authoritative document, zoom, selection, and which modal
//! is open. Host code (the Leptos page) feeds it drag events and shortcuts and
//! gets back an [`Action`] describing any side effect to run: a network call,
//! a modal to show, or just a re-render. Nothing here performs I/O, so the
//! whole page state machine is testable natively.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{Point, Zoom};
use crate::doc::{Connection, DocStore, MapNode, NodeId, PartialMapNode};
use crate::input::{DragEvent, MapShortcut};

/// Which modal dialog the canvas page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    AddNode,
    NodeDetails(NodeId),
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    None,
    /// Persist a node's final position after a drag.
    PersistPosition { id: NodeId, position: Point },
    /// A node was selected and its details modal opened.
    Select(NodeId),
    OpenAddNode,
    CloseModals,
    /// Delete a node through the backend, then call [`MapCore::remove_node`].
    DeleteNode(NodeId),
    RenderNeeded,
}

/// Core canvas-page state. Separated from the Leptos page so it can be tested
/// without browser dependencies.
#[derive(Debug, Clone, Default)]
pub struct MapCore {
    pub doc: DocStore,
    zoom: Zoom,
    selected: Option<NodeId>,
    modal: Modal,
    read_only: bool,
}

impl MapCore {
    #[must_use]
    pub fn new(read_only: bool) -> Self {
        Self { read_only, ..Self::default() }
    }

    // --- Data inputs ---

    /// Replace the document with a fresh fetch. Selection survives only if
    /// the selected node is still present.
    pub fn load_snapshot(&mut self, nodes: Vec<MapNode>, connections: Vec<Connection>) {
        self.doc.load_snapshot(nodes, connections);
        if let Some(id) = self.selected
            && self.doc.node(id).is_none()
        {
            self.deselect();
        }
    }

    /// Apply a confirmed title/description/position update.
    pub fn apply_update(&mut self, id: NodeId, partial: &PartialMapNode) -> bool {
        self.doc.apply_partial(id, partial)
    }

    /// Drop a node after the backend confirmed its deletion.
    pub fn remove_node(&mut self, id: NodeId) -> Option<MapNode> {
        let removed = self.doc.remove_node(id)?;
        if self.selected == Some(id) {
            self.deselect();
        }
        Some(removed)
    }

    /// Switch visitor mode. Entering it abandons any drag in flight, so
    /// every node snaps back to its committed position.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if !read_only {
            return;
        }
        self.doc.clear_all_live();
        if self.modal == Modal::AddNode {
            self.modal = Modal::None;
        }
    }

    // --- Drag ---

    /// Local-only position update while a drag is in progress.
    pub fn live_position(&mut self, id: NodeId, position: Point) -> Action {
        if self.read_only || !self.doc.set_live_position(id, position) {
            return Action::None;
        }
        Action::RenderNeeded
    }

    /// Commit the final drag position and ask the host to persist it.
    pub fn drag_ended(&mut self, id: NodeId, position: Point) -> Action {
        if self.read_only || !self.doc.commit_position(id, position) {
            return Action::None;
        }
        Action::PersistPosition { id, position }
    }

    /// Route one node's [`DragEvent`] to the matching handler.
    pub fn handle_drag(&mut self, id: NodeId, event: DragEvent) -> Action {
        match event {
            DragEvent::Moved(position) => self.live_position(id, position),
            DragEvent::Ended(position) => self.drag_ended(id, position),
            DragEvent::Released => {
                self.doc.clear_live(id);
                Action::None
            }
            DragEvent::Select => self.select(id),
            DragEvent::Started | DragEvent::None => Action::None,
        }
    }

    // --- Selection / modals ---

    /// Select a node and open its details. Allowed in read-only mode.
    pub fn select(&mut self, id: NodeId) -> Action {
        if self.doc.node(id).is_none() {
            return Action::None;
        }
        self.selected = Some(id);
        self.modal = Modal::NodeDetails(id);
        Action::Select(id)
    }

    pub fn open_add_node(&mut self) -> Action {
        if self.read_only {
            return Action::None;
        }
        self.modal = Modal::AddNode;
        Action::OpenAddNode
    }

    /// Close any modal and clear the selection.
    pub fn close_modals(&mut self) -> Action {
        self.deselect();
        Action::CloseModals
    }

    fn deselect(&mut self) {
        self.selected = None;
        self.modal = Modal::None;
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> Action {
        self.zoom = self.zoom.zoomed_in();
        Action::RenderNeeded
    }

    pub fn zoom_out(&mut self) -> Action {
        self.zoom = self.zoom.zoomed_out();
        Action::RenderNeeded
    }

    // --- Keyboard ---

    /// Apply a shortcut. Ignored while loading; read-only mode only allows
    /// zoom and escape.
    pub fn apply_shortcut(&mut self, shortcut: MapShortcut, loading: bool) -> Action {
        if loading || (self.read_only && !shortcut.allowed_read_only()) {
            return Action::None;
        }
        match shortcut {
            MapShortcut::NewNode => self.open_add_node(),
            MapShortcut::ZoomIn => self.zoom_in(),
            MapShortcut::ZoomOut => self.zoom_out(),
            MapShortcut::Escape => self.close_modals(),
            MapShortcut::Delete => self.selected.map_or(Action::None, Action::DeleteNode),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.selected
    }

    #[must_use]
    pub fn modal(&self) -> Modal {
        self.modal
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.doc.node(id)
    }
}
