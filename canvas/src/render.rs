//! Rendering model: turns the document into a flat scene for the DOM layer.
//!
//! The Leptos renderer draws an SVG edge layer underneath absolutely
//! positioned node boxes. Everything it needs is computed here so the view
//! code only maps data to elements. Edges come first in the scene and are
//! painted first.
//!
//! Edge geometry is memoized per connection on its two endpoint positions.
//! During a drag only the edges touching the dragged node miss the cache.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::collections::{HashMap, HashSet};

use crate::camera::{Point, Zoom};
use crate::doc::{ConnectionId, DocStore, NodeId};
use crate::edge::{Arrowhead, EdgeGeometry};

/// Explicit renderer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderConfig {
    /// Visitor mode: no drag handles.
    pub read_only: bool,
    /// Draw an arrowhead at each connection's `to` end.
    pub show_arrowheads: bool,
}

/// One drawn connection.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeView {
    pub connection_id: ConnectionId,
    /// SVG path data.
    pub path: String,
    pub arrowhead: Option<Arrowhead>,
}

/// One drawn node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeView {
    pub id: NodeId,
    pub title: String,
    pub description: String,
    /// Top-left, live during a drag.
    pub position: Point,
    pub connection_label: String,
    pub show_handle: bool,
    pub selected: bool,
}

impl NodeView {
    /// Inline style placing the node box.
    #[must_use]
    pub fn style(&self) -> String {
        format!("left: {}px; top: {}px;", self.position.x, self.position.y)
    }
}

/// Everything the canvas draws for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// CSS transform for the scaled container.
    pub transform: String,
    pub edges: Vec<EdgeView>,
    pub nodes: Vec<NodeView>,
}

impl Scene {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.nodes.is_empty()
    }
}

/// `"1 connection"` / `"N connections"`.
#[must_use]
pub fn connection_label(count: usize) -> String {
    if count == 1 {
        "1 connection".to_owned()
    } else {
        format!("{count} connections")
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedEdge {
    from: Point,
    to: Point,
    geometry: EdgeGeometry,
}

/// Per-connection memo of edge geometry, keyed on endpoint positions.
#[derive(Debug, Clone, Default)]
pub struct EdgeCache {
    entries: HashMap<ConnectionId, CachedEdge>,
    misses: u64,
}

impl EdgeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry for `id` between two node top-lefts, recomputed only when
    /// either endpoint moved.
    pub fn geometry(&mut self, id: ConnectionId, from: Point, to: Point) -> EdgeGeometry {
        if let Some(cached) = self.entries.get(&id)
            && cached.from == from
            && cached.to == to
        {
            return cached.geometry;
        }
        self.misses += 1;
        let geometry = EdgeGeometry::between(from, to);
        self.entries.insert(id, CachedEdge { from, to, geometry });
        geometry
    }

    /// Forget connections that are no longer drawn.
    pub fn retain(&mut self, live: &HashSet<ConnectionId>) {
        self.entries.retain(|id, _| live.contains(id));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// How many times geometry was recomputed.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

/// Build the scene for the current document state.
///
/// Connections with a missing endpoint are skipped.
pub fn build_scene(
    doc: &DocStore,
    zoom: Zoom,
    selected: Option<NodeId>,
    config: RenderConfig,
    cache: &mut EdgeCache,
) -> Scene {
    let mut drawn = HashSet::new();
    let mut edges = Vec::with_capacity(doc.connections().len());
    for conn in doc.connections() {
        let (Some(from), Some(to)) = (doc.node(conn.from), doc.node(conn.to)) else {
            continue;
        };
        let geometry = cache.geometry(conn.id, from.current_position(), to.current_position());
        drawn.insert(conn.id);
        edges.push(EdgeView {
            connection_id: conn.id,
            path: geometry.path_data(),
            arrowhead: config.show_arrowheads.then(|| geometry.arrowhead()),
        });
    }
    cache.retain(&drawn);

    let nodes = doc
        .nodes()
        .map(|node| NodeView {
            id: node.id,
            title: node.title.clone(),
            description: node.description.clone(),
            position: node.current_position(),
            connection_label: connection_label(doc.connection_count(node.id)),
            show_handle: !config.read_only,
            selected: selected == Some(node.id),
        })
        .collect();

    Scene { transform: zoom.css_transform(), edges, nodes }
}
