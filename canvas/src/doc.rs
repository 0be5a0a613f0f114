//! Document model: learning nodes, their connections, and the in-memory store.
//!
//! `DocStore` is the authoritative node/connection list for the open topic.
//! Data flows in from the network (a snapshot after every refetch) and from
//! the drag primitive (live positions). The renderer reads nodes in load
//! order and resolves each connection's endpoints through the store.
//!
//! Connections are stored as directed `from`/`to` rows but every query here
//! treats them as unordered pairs.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a learning node.
pub type NodeId = Uuid;
/// Unique identifier for a topic.
pub type TopicId = Uuid;
/// Unique identifier for a connection row.
pub type ConnectionId = Uuid;

/// A positioned concept within a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: NodeId,
    pub topic_id: TopicId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Committed top-left in canvas pixels.
    pub position: Point,
    /// Uncommitted top-left while a drag is in progress.
    #[serde(skip)]
    pub live: Option<Point>,
}

impl MapNode {
    /// Where the node is drawn right now: live during a drag, committed otherwise.
    #[must_use]
    pub fn current_position(&self) -> Point {
        self.live.unwrap_or(self.position)
    }
}

/// Sparse update for a node. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialMapNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
}

impl PartialMapNode {
    #[must_use]
    pub fn position(position: Point) -> Self {
        Self { position: Some(position), ..Self::default() }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.position.is_none()
    }
}

/// An adjacency between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub from: NodeId,
    pub to: NodeId,
}

impl Connection {
    #[must_use]
    pub fn touches(&self, node: NodeId) -> bool {
        self.from == node || self.to == node
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    #[must_use]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.from == node {
            Some(self.to)
        } else if self.to == node {
            Some(self.from)
        } else {
            None
        }
    }

    /// Whether this connection joins `a` and `b` in either direction.
    #[must_use]
    pub fn same_pair(&self, a: NodeId, b: NodeId) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

/// Work needed to move a node's neighbor set to a desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionDiff {
    /// Neighbors to connect, in request order.
    pub to_add: Vec<NodeId>,
    /// Existing rows to delete, exactly as stored.
    pub to_remove: Vec<Connection>,
}

impl ConnectionDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// In-memory store of the open topic's nodes and connections.
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    nodes: HashMap<NodeId, MapNode>,
    order: Vec<NodeId>,
    connections: Vec<Connection>,
}

impl DocStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a fresh snapshot. Duplicate and self
    /// connections in the snapshot are dropped.
    pub fn load_snapshot(&mut self, nodes: Vec<MapNode>, connections: Vec<Connection>) {
        self.nodes.clear();
        self.order.clear();
        self.connections.clear();
        for node in nodes {
            self.insert_node(node);
        }
        for conn in connections {
            self.insert_connection(conn);
        }
    }

    /// Insert or replace a node. New nodes go to the end of the draw order.
    pub fn insert_node(&mut self, node: MapNode) {
        if !self.nodes.contains_key(&node.id) {
            self.order.push(node.id);
        }
        self.nodes.insert(node.id, node);
    }

    /// Remove a node and every connection touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Option<MapNode> {
        let node = self.nodes.remove(&id)?;
        self.order.retain(|n| *n != id);
        self.connections.retain(|c| !c.touches(id));
        Some(node)
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MapNode> {
        self.nodes.get(&id)
    }

    /// Nodes in load order.
    pub fn nodes(&self) -> impl Iterator<Item = &MapNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Apply a partial update. Returns false if the node doesn't exist.
    pub fn apply_partial(&mut self, id: NodeId, partial: &PartialMapNode) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        if let Some(title) = &partial.title {
            node.title.clone_from(title);
        }
        if let Some(description) = &partial.description {
            node.description.clone_from(description);
        }
        if let Some(position) = partial.position {
            node.position = position;
            node.live = None;
        }
        true
    }

    /// Set a node's uncommitted drag position.
    pub fn set_live_position(&mut self, id: NodeId, position: Point) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.live = Some(position);
        true
    }

    /// Commit a node's position and clear any live override.
    pub fn commit_position(&mut self, id: NodeId, position: Point) -> bool {
        self.apply_partial(id, &PartialMapNode::position(position))
    }

    /// Drop a live override without committing it.
    pub fn clear_live(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.live = None;
        }
    }

    /// Drop every live override, e.g. when dragging is switched off.
    pub fn clear_all_live(&mut self) {
        for node in self.nodes.values_mut() {
            node.live = None;
        }
    }

    /// Add a connection. Self-connections and repeats of an existing pair
    /// (in either direction) are rejected.
    pub fn insert_connection(&mut self, conn: Connection) -> bool {
        if conn.from == conn.to || self.connections.iter().any(|c| c.id == conn.id || c.same_pair(conn.from, conn.to)) {
            return false;
        }
        self.connections.push(conn);
        true
    }

    pub fn remove_connection(&mut self, id: ConnectionId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(idx))
    }

    #[must_use]
    pub fn connection_count(&self, id: NodeId) -> usize {
        self.connections.iter().filter(|c| c.touches(id)).count()
    }

    /// Neighbors of `id`, in connection order.
    #[must_use]
    pub fn connected_ids(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.connections
            .iter()
            .filter_map(|c| c.other(id))
            .filter(|n| seen.insert(*n))
            .collect()
    }

    /// Filter a connection request for `node` down to pairs that would
    /// actually be new: drops `node` itself, repeats, and existing neighbors.
    #[must_use]
    pub fn plan_new_connections(&self, node: NodeId, requested: &[NodeId]) -> Vec<NodeId> {
        let mut seen: HashSet<NodeId> = self.connected_ids(node).into_iter().collect();
        seen.insert(node);
        requested.iter().copied().filter(|n| seen.insert(*n)).collect()
    }

    /// Symmetric difference between `node`'s current neighbors and `desired`.
    #[must_use]
    pub fn diff_connections(&self, node: NodeId, desired: &[NodeId]) -> ConnectionDiff {
        let wanted: HashSet<NodeId> = desired.iter().copied().filter(|n| *n != node).collect();
        let to_add = self.plan_new_connections(node, desired);
        let to_remove = self
            .connections
            .iter()
            .filter(|c| c.other(node).is_some_and(|other| !wanted.contains(&other)))
            .copied()
            .collect();
        ConnectionDiff { to_add, to_remove }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
