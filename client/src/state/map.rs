//! Canvas-page state: the open topic and its map.
//!
//! SYSTEM CONTEXT
//! ==============
//! `TopicMapPage` keeps one `RwSignal<MapState>`. Everything synchronous
//! (document, zoom, selection, modal) is delegated to `canvas::engine::MapCore`;
//! this wrapper adds the topic header and the page's load status.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use canvas::doc::{MapNode, NodeId};
use canvas::engine::MapCore;
use canvas::render::RenderConfig;

use crate::net::types::Topic;

/// Error text when the topic could not be loaded.
pub const TOPIC_NOT_FOUND: &str = "Topic not found";

#[derive(Clone, Debug)]
pub struct MapState {
    pub core: MapCore,
    pub topic: Option<Topic>,
    pub loading: bool,
    pub error: Option<String>,
    pub show_arrowheads: bool,
}

impl Default for MapState {
    fn default() -> Self {
        Self { core: MapCore::new(true), topic: None, loading: true, error: None, show_arrowheads: false }
    }
}

impl MapState {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig { read_only: self.core.is_read_only(), show_arrowheads: self.show_arrowheads }
    }

    /// Load failure to show in place of the canvas, once loading is done.
    pub fn error_message(&self) -> Option<String> {
        if self.loading {
            return None;
        }
        self.error.clone().or_else(|| self.topic.is_none().then(|| TOPIC_NOT_FOUND.to_owned()))
    }

    pub fn selected_node(&self) -> Option<&MapNode> {
        self.core.selection().and_then(|id| self.core.node(id))
    }

    /// Nodes adjacent to `id`, in document order.
    pub fn connected_nodes(&self, id: NodeId) -> Vec<&MapNode> {
        let neighbors = self.core.doc.connected_ids(id);
        self.core.doc.nodes().filter(|n| neighbors.contains(&n.id)).collect()
    }

    /// `(id, title)` of every node except `exclude`, for connection pickers.
    pub fn node_options(&self, exclude: Option<NodeId>) -> Vec<(NodeId, String)> {
        self.core.doc.nodes().filter(|n| Some(n.id) != exclude).map(|n| (n.id, n.title.clone())).collect()
    }

    /// Topic colors as `(background, foreground)`.
    pub fn colors(&self) -> (String, String) {
        self.topic
            .as_ref()
            .map(|t| (t.icon_bg_color.clone(), t.icon_color.clone()))
            .unwrap_or_default()
    }
}
