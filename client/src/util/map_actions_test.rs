use std::cell::RefCell;
use std::collections::HashSet;

use async_trait::async_trait;
use futures::executor::block_on;
use uuid::Uuid;

use super::*;
use crate::net::types::TopicPatch;

/// In-memory backend for one topic. Records every call by name.
#[derive(Default)]
struct MockBackend {
    topic: RefCell<Option<Topic>>,
    nodes: RefCell<Vec<MapNode>>,
    connections: RefCell<Vec<Connection>>,
    /// Connection creates to these targets fail.
    reject_targets: HashSet<NodeId>,
    fail_updates: bool,
    fail_lists: bool,
    calls: RefCell<Vec<String>>,
}

impl MockBackend {
    fn log(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn calls_named(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn doc(&self) -> DocStore {
        let mut doc = DocStore::new();
        doc.load_snapshot(self.nodes.borrow().clone(), self.connections.borrow().clone());
        doc
    }
}

#[async_trait(?Send)]
impl TopicsApi for MockBackend {
    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        Ok(self.topic.borrow().iter().cloned().collect())
    }

    async fn get_topic(&self, _id: TopicId) -> Result<Option<Topic>, ApiError> {
        self.log("get_topic");
        Ok(self.topic.borrow().clone())
    }

    async fn create_topic(&self, _topic: &crate::net::types::NewTopic) -> Result<Topic, ApiError> {
        unreachable!("map actions never create topics")
    }

    async fn update_topic(&self, _id: TopicId, _patch: &TopicPatch) -> Result<Topic, ApiError> {
        unreachable!("map actions never update topics")
    }

    async fn delete_topic(&self, _id: TopicId) -> Result<(), ApiError> {
        unreachable!("map actions never delete topics")
    }
}

#[async_trait(?Send)]
impl NodesApi for MockBackend {
    async fn list_nodes(&self, _topic: TopicId) -> Result<Vec<MapNode>, ApiError> {
        self.log("list_nodes");
        if self.fail_lists {
            return Err(ApiError::Network("offline".into()));
        }
        Ok(self.nodes.borrow().clone())
    }

    async fn get_node(&self, id: NodeId) -> Result<Option<MapNode>, ApiError> {
        Ok(self.nodes.borrow().iter().find(|n| n.id == id).cloned())
    }

    async fn create_node(&self, node: &NewNode) -> Result<MapNode, ApiError> {
        self.log("create_node");
        let created = MapNode {
            id: Uuid::new_v4(),
            topic_id: node.topic_id,
            title: node.title.clone(),
            description: node.description.clone(),
            position: node.position,
            live: None,
        };
        self.nodes.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_node(&self, id: NodeId, patch: &PartialMapNode) -> Result<MapNode, ApiError> {
        self.log("update_node");
        if self.fail_updates {
            return Err(ApiError::Backend { status: 500, code: None, message: "boom".into() });
        }
        let mut nodes = self.nodes.borrow_mut();
        let node = nodes.iter_mut().find(|n| n.id == id).ok_or(ApiError::NotFound)?;
        if let Some(title) = &patch.title {
            node.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            node.description.clone_from(description);
        }
        if let Some(position) = patch.position {
            node.position = position;
        }
        Ok(node.clone())
    }

    async fn delete_node(&self, id: NodeId) -> Result<(), ApiError> {
        self.log("delete_node");
        self.nodes.borrow_mut().retain(|n| n.id != id);
        self.connections.borrow_mut().retain(|c| !c.touches(id));
        Ok(())
    }
}

#[async_trait(?Send)]
impl ConnectionsApi for MockBackend {
    async fn list_connections(&self, _topic: TopicId) -> Result<Vec<Connection>, ApiError> {
        self.log("list_connections");
        Ok(self.connections.borrow().clone())
    }

    async fn list_node_connections(&self, node: NodeId) -> Result<Vec<Connection>, ApiError> {
        Ok(self.connections.borrow().iter().filter(|c| c.touches(node)).copied().collect())
    }

    async fn create_connection(&self, from: NodeId, to: NodeId) -> Result<Connection, ApiError> {
        self.log(format!("create_connection {to}"));
        if self.reject_targets.contains(&to) {
            return Err(ApiError::Backend { status: 409, code: None, message: "rejected".into() });
        }
        let conn = Connection { id: Uuid::new_v4(), from, to };
        self.connections.borrow_mut().push(conn);
        Ok(conn)
    }

    async fn create_connections(&self, pairs: &[(NodeId, NodeId)]) -> Result<Vec<Connection>, ApiError> {
        let mut out = Vec::new();
        for (from, to) in pairs {
            out.push(self.create_connection(*from, *to).await?);
        }
        Ok(out)
    }

    async fn delete_connection(&self, from: NodeId, to: NodeId) -> Result<(), ApiError> {
        self.log(format!("delete_connection {to}"));
        self.connections.borrow_mut().retain(|c| !(c.from == from && c.to == to));
        Ok(())
    }

    async fn delete_node_connections(&self, node: NodeId) -> Result<(), ApiError> {
        self.connections.borrow_mut().retain(|c| !c.touches(node));
        Ok(())
    }
}

fn node(title: &str) -> MapNode {
    MapNode {
        id: Uuid::new_v4(),
        topic_id: Uuid::nil(),
        title: title.into(),
        description: String::new(),
        position: Point::new(300.0, 300.0),
        live: None,
    }
}

fn topic() -> Topic {
    Topic {
        id: Uuid::nil(),
        title: "Rust".into(),
        description: "systems".into(),
        icon_bg_color: "rgba(59, 130, 246, 0.13)".into(),
        icon_color: "#3b82f6".into(),
        is_public: false,
        user_id: None,
        created_at: "2024-01-01T00:00:00Z".into(),
        node_count: 0,
    }
}

/// Backend holding nodes `a`, `b`, `c` with `a`–`b` connected.
fn seeded() -> (MockBackend, [NodeId; 3]) {
    let (a, b, c) = (node("a"), node("b"), node("c"));
    let ids = [a.id, b.id, c.id];
    let backend = MockBackend {
        topic: RefCell::new(Some(topic())),
        nodes: RefCell::new(vec![a, b, c]),
        connections: RefCell::new(vec![Connection { id: Uuid::new_v4(), from: ids[0], to: ids[1] }]),
        ..MockBackend::default()
    };
    (backend, ids)
}

fn neighbors(backend: &MockBackend, id: NodeId) -> HashSet<NodeId> {
    backend.doc().connected_ids(id).into_iter().collect()
}

// =============================================================
// Loading
// =============================================================

#[test]
fn load_map_fetches_all_three_lists() {
    let (backend, _) = seeded();
    let snapshot = block_on(load_map(&backend, Uuid::nil())).expect("load").expect("topic exists");
    assert_eq!(snapshot.topic.title, "Rust");
    assert_eq!(snapshot.nodes.len(), 3);
    assert_eq!(snapshot.connections.len(), 1);
    assert_eq!(backend.calls_named("get_topic"), 1);
    assert_eq!(backend.calls_named("list_nodes"), 1);
    assert_eq!(backend.calls_named("list_connections"), 1);
}

#[test]
fn load_map_reports_missing_topic_as_none() {
    let backend = MockBackend::default();
    assert!(block_on(load_map(&backend, Uuid::nil())).expect("load").is_none());
}

#[test]
fn load_map_propagates_list_failure() {
    let backend = MockBackend { topic: RefCell::new(Some(topic())), fail_lists: true, ..MockBackend::default() };
    let err = block_on(load_map(&backend, Uuid::nil())).expect_err("offline");
    assert!(matches!(err, ApiError::Network(_)));
}

#[test]
fn empty_topic_loads_empty_graph() {
    let backend = MockBackend { topic: RefCell::new(Some(topic())), ..MockBackend::default() };
    let (nodes, connections) = block_on(load_graph(&backend, Uuid::nil())).expect("load");
    assert!(nodes.is_empty());
    assert!(connections.is_empty());
}

// =============================================================
// Positions
// =============================================================

#[test]
fn persist_position_sends_one_partial_update() {
    let (backend, ids) = seeded();
    assert!(block_on(persist_position(&backend, ids[0], Point::new(420.0, 80.0))));
    assert_eq!(backend.calls_named("update_node"), 1);
    let stored = backend.nodes.borrow()[0].position;
    assert_eq!(stored, Point::new(420.0, 80.0));
}

#[test]
fn persist_position_failure_is_reported_not_raised() {
    let (mut backend, ids) = seeded();
    backend.fail_updates = true;
    assert!(!block_on(persist_position(&backend, ids[0], Point::new(1.0, 2.0))));
}

// =============================================================
// Create
// =============================================================

#[test]
fn create_node_requires_a_title() {
    let (backend, _) = seeded();
    let draft = NodeDraft { title: "   ".into(), ..NodeDraft::default() };
    let err = block_on(create_node(&backend, &backend.doc(), Uuid::nil(), &draft)).expect_err("blank");
    assert_eq!(err, MapActionError::Validation(ValidationError::Required("Title")));
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn create_node_connects_each_requested_node() {
    let (backend, ids) = seeded();
    let doc = backend.doc();
    let draft = NodeDraft { title: " Lifetimes ".into(), description: "borrowck".into(), connect_to: vec![ids[0], ids[2]] };

    let created = block_on(create_node(&backend, &doc, Uuid::nil(), &draft)).expect("create");
    assert_eq!(created.title, "Lifetimes");
    assert_eq!(created.position, Point::new(300.0, 300.0));
    assert_eq!(backend.calls_named("create_connection"), 2);
    assert_eq!(neighbors(&backend, created.id), HashSet::from([ids[0], ids[2]]));
}

#[test]
fn create_node_drops_duplicate_and_unknown_targets() {
    let (backend, ids) = seeded();
    let doc = backend.doc();
    let draft = NodeDraft { title: "x".into(), connect_to: vec![ids[1], ids[1], Uuid::new_v4()], ..NodeDraft::default() };

    block_on(create_node(&backend, &doc, Uuid::nil(), &draft)).expect("create");
    assert_eq!(backend.calls_named("create_connection"), 1);
}

#[test]
fn partial_connection_failure_keeps_node_and_accepted_connections() {
    let (mut backend, ids) = seeded();
    backend.reject_targets.insert(ids[1]);
    let doc = backend.doc();
    let draft = NodeDraft { title: "new".into(), connect_to: ids.to_vec(), ..NodeDraft::default() };

    let err = block_on(create_node(&backend, &doc, Uuid::nil(), &draft)).expect_err("one rejected");
    let MapActionError::PartialConnections { node, requested, failed } = err else {
        panic!("expected partial failure, got {err:?}");
    };
    assert_eq!((requested, failed), (3, 1));

    let (nodes, connections) = block_on(load_graph(&backend, Uuid::nil())).expect("refresh");
    assert!(nodes.iter().any(|n| n.id == node));
    assert_eq!(connections.iter().filter(|c| c.touches(node)).count(), 2);
}

// =============================================================
// Delete
// =============================================================

#[test]
fn deleted_node_leaves_no_connection_behind() {
    let (backend, ids) = seeded();
    block_on(delete_node(&backend, ids[0])).expect("delete");
    let (nodes, connections) = block_on(load_graph(&backend, Uuid::nil())).expect("refresh");
    assert_eq!(nodes.len(), 2);
    assert!(connections.iter().all(|c| !c.touches(ids[0])));
}

// =============================================================
// Reconcile
// =============================================================

#[test]
fn reconcile_swaps_one_neighbor_for_another() {
    // a: {b, c} -> {c, d}
    let (backend, ids) = seeded();
    let d = node("d");
    let d_id = d.id;
    backend.nodes.borrow_mut().push(d);
    backend.connections.borrow_mut().push(Connection { id: Uuid::new_v4(), from: ids[2], to: ids[0] });

    block_on(reconcile_connections(&backend, &backend.doc(), ids[0], &[ids[2], d_id])).expect("reconcile");
    assert_eq!(backend.calls_named("create_connection"), 1);
    assert_eq!(backend.calls_named(&format!("create_connection {d_id}")), 1);
    assert_eq!(backend.calls_named("delete_connection"), 1);
    assert_eq!(backend.calls_named(&format!("delete_connection {}", ids[1])), 1);
    assert_eq!(neighbors(&backend, ids[0]), HashSet::from([ids[2], d_id]));
}

#[test]
fn reconcile_deletes_stored_direction() {
    // the a-b row is stored as a -> b; editing b must delete that exact pair
    let (backend, ids) = seeded();
    block_on(reconcile_connections(&backend, &backend.doc(), ids[1], &[])).expect("reconcile");
    assert_eq!(backend.calls_named(&format!("delete_connection {}", ids[1])), 1);
    assert!(backend.connections.borrow().is_empty());
}

#[test]
fn reconcile_without_changes_sends_nothing() {
    let (backend, ids) = seeded();
    block_on(reconcile_connections(&backend, &backend.doc(), ids[0], &[ids[1], ids[0]])).expect("reconcile");
    assert!(backend.calls.borrow().is_empty());
}

#[test]
fn reconcile_reports_failure_after_all_requests() {
    let (mut backend, ids) = seeded();
    backend.reject_targets.insert(ids[2]);
    let err = block_on(reconcile_connections(&backend, &backend.doc(), ids[0], &[ids[2]])).expect_err("rejected");
    assert!(matches!(err, MapActionError::Api(ApiError::Backend { status: 409, .. })));
    // the removal still ran
    assert_eq!(backend.calls_named("delete_connection"), 1);
}

// =============================================================
// Save details
// =============================================================

#[test]
fn save_details_updates_text_and_connections() {
    let (backend, ids) = seeded();
    let edit = NodeEdit { title: "Alpha".into(), description: " first ".into(), connections: vec![ids[2]] };

    let updated = block_on(save_node_details(&backend, &backend.doc(), ids[0], &edit)).expect("save");
    assert_eq!(updated.title, "Alpha");
    assert_eq!(updated.description, "first");
    assert_eq!(neighbors(&backend, ids[0]), HashSet::from([ids[2]]));
}

#[test]
fn save_details_stops_when_update_fails() {
    let (mut backend, ids) = seeded();
    backend.fail_updates = true;
    let edit = NodeEdit { title: "Alpha".into(), connections: vec![ids[2]], ..NodeEdit::default() };

    let err = block_on(save_node_details(&backend, &backend.doc(), ids[0], &edit)).expect_err("fails");
    assert_eq!(err.user_message("save changes"), "Failed to save changes. Please try again.");
    assert_eq!(backend.calls_named("create_connection"), 0);
}

#[test]
fn validation_messages_are_shown_verbatim() {
    let err = MapActionError::Validation(ValidationError::Required("Title"));
    assert_eq!(err.user_message("save changes"), "Title is required");
}
