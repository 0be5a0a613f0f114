#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use serde_json::json;
use uuid::Uuid;

use super::*;

fn make_node(x: f64, y: f64) -> MapNode {
    MapNode {
        id: Uuid::new_v4(),
        topic_id: Uuid::nil(),
        title: "Ownership".into(),
        description: String::new(),
        position: Point::new(x, y),
        live: None,
    }
}

fn connect(from: NodeId, to: NodeId) -> Connection {
    Connection { id: Uuid::new_v4(), from, to }
}

fn store_with(n: usize) -> (DocStore, Vec<NodeId>) {
    let nodes: Vec<MapNode> = (0..n).map(|i| make_node(i as f64 * 10.0, 0.0)).collect();
    let ids = nodes.iter().map(|n| n.id).collect();
    let mut store = DocStore::new();
    store.load_snapshot(nodes, Vec::new());
    (store, ids)
}

// =============================================================
// MapNode
// =============================================================

#[test]
fn current_position_prefers_live() {
    let mut node = make_node(10.0, 20.0);
    assert_eq!(node.current_position(), Point::new(10.0, 20.0));
    node.live = Some(Point::new(50.0, 60.0));
    assert_eq!(node.current_position(), Point::new(50.0, 60.0));
}

#[test]
fn node_deserializes_without_description() {
    let id = Uuid::new_v4();
    let node: MapNode = serde_json::from_value(json!({
        "id": id,
        "topic_id": Uuid::nil(),
        "title": "Borrowing",
        "position": { "x": 1.0, "y": 2.0 },
    }))
    .unwrap();
    assert_eq!(node.id, id);
    assert_eq!(node.description, "");
    assert!(node.live.is_none());
}

#[test]
fn node_never_serializes_live_position() {
    let mut node = make_node(0.0, 0.0);
    node.live = Some(Point::new(9.0, 9.0));
    let value = serde_json::to_value(&node).unwrap();
    assert!(value.get("live").is_none());
}

// =============================================================
// PartialMapNode
// =============================================================

#[test]
fn partial_serializes_only_present_fields() {
    let partial = PartialMapNode::position(Point::new(3.0, 4.0));
    let value = serde_json::to_value(&partial).unwrap();
    assert_eq!(value, json!({ "position": { "x": 3.0, "y": 4.0 } }));
}

#[test]
fn partial_default_is_empty() {
    assert!(PartialMapNode::default().is_empty());
    assert!(!PartialMapNode::position(Point::default()).is_empty());
}

// =============================================================
// Connection
// =============================================================

#[test]
fn connection_pair_queries_ignore_direction() {
    let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let conn = connect(a, b);
    assert!(conn.touches(a));
    assert!(conn.touches(b));
    assert!(!conn.touches(c));
    assert_eq!(conn.other(a), Some(b));
    assert_eq!(conn.other(b), Some(a));
    assert_eq!(conn.other(c), None);
    assert!(conn.same_pair(a, b));
    assert!(conn.same_pair(b, a));
    assert!(!conn.same_pair(a, c));
}

// =============================================================
// DocStore: nodes
// =============================================================

#[test]
fn new_store_is_empty() {
    let store = DocStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.connections().is_empty());
    assert_eq!(store.nodes().count(), 0);
}

#[test]
fn nodes_keep_load_order() {
    let (store, ids) = store_with(5);
    let seen: Vec<NodeId> = store.nodes().map(|n| n.id).collect();
    assert_eq!(seen, ids);
}

#[test]
fn insert_existing_node_replaces_in_place() {
    let (mut store, ids) = store_with(3);
    let mut replacement = store.node(ids[1]).unwrap().clone();
    replacement.title = "Lifetimes".into();
    store.insert_node(replacement);
    assert_eq!(store.len(), 3);
    assert_eq!(store.nodes().nth(1).unwrap().title, "Lifetimes");
}

#[test]
fn load_snapshot_replaces_everything() {
    let (mut store, ids) = store_with(2);
    store.insert_connection(connect(ids[0], ids[1]));
    let fresh = make_node(0.0, 0.0);
    let fresh_id = fresh.id;
    store.load_snapshot(vec![fresh], Vec::new());
    assert_eq!(store.len(), 1);
    assert!(store.node(fresh_id).is_some());
    assert!(store.node(ids[0]).is_none());
    assert!(store.connections().is_empty());
}

#[test]
fn apply_partial_updates_fields() {
    let (mut store, ids) = store_with(1);
    let partial = PartialMapNode {
        title: Some("Traits".into()),
        description: Some("Shared behavior".into()),
        position: None,
    };
    assert!(store.apply_partial(ids[0], &partial));
    let node = store.node(ids[0]).unwrap();
    assert_eq!(node.title, "Traits");
    assert_eq!(node.description, "Shared behavior");
    assert_eq!(node.position, Point::new(0.0, 0.0));
}

#[test]
fn apply_partial_missing_node_returns_false() {
    let mut store = DocStore::new();
    assert!(!store.apply_partial(Uuid::new_v4(), &PartialMapNode::default()));
}

#[test]
fn live_position_overrides_until_commit() {
    let (mut store, ids) = store_with(1);
    assert!(store.set_live_position(ids[0], Point::new(40.0, 50.0)));
    let node = store.node(ids[0]).unwrap();
    assert_eq!(node.position, Point::new(0.0, 0.0));
    assert_eq!(node.current_position(), Point::new(40.0, 50.0));

    assert!(store.commit_position(ids[0], Point::new(40.0, 50.0)));
    let node = store.node(ids[0]).unwrap();
    assert_eq!(node.position, Point::new(40.0, 50.0));
    assert!(node.live.is_none());
}

#[test]
fn clear_live_reverts_to_committed() {
    let (mut store, ids) = store_with(1);
    store.set_live_position(ids[0], Point::new(99.0, 99.0));
    store.clear_live(ids[0]);
    assert_eq!(store.node(ids[0]).unwrap().current_position(), Point::new(0.0, 0.0));
}

#[test]
fn live_position_on_missing_node_returns_false() {
    let mut store = DocStore::new();
    assert!(!store.set_live_position(Uuid::new_v4(), Point::default()));
    assert!(!store.commit_position(Uuid::new_v4(), Point::default()));
}

#[test]
fn remove_node_cascades_connections() {
    let (mut store, ids) = store_with(4);
    store.insert_connection(connect(ids[0], ids[1]));
    store.insert_connection(connect(ids[2], ids[0]));
    store.insert_connection(connect(ids[2], ids[3]));

    let removed = store.remove_node(ids[0]).unwrap();
    assert_eq!(removed.id, ids[0]);
    assert!(store.connections().iter().all(|c| !c.touches(ids[0])));
    assert_eq!(store.connections().len(), 1);
    assert_eq!(store.nodes().count(), 3);
}

#[test]
fn remove_missing_node_returns_none() {
    let (mut store, _) = store_with(1);
    assert!(store.remove_node(Uuid::new_v4()).is_none());
    assert_eq!(store.len(), 1);
}

// =============================================================
// DocStore: connections
// =============================================================

#[test]
fn insert_connection_rejects_self_and_duplicates() {
    let (mut store, ids) = store_with(2);
    assert!(store.insert_connection(connect(ids[0], ids[1])));
    assert!(!store.insert_connection(connect(ids[0], ids[1])));
    assert!(!store.insert_connection(connect(ids[1], ids[0])));
    assert!(!store.insert_connection(connect(ids[0], ids[0])));
    assert_eq!(store.connections().len(), 1);
}

#[test]
fn snapshot_drops_duplicate_connections() {
    let a = make_node(0.0, 0.0);
    let b = make_node(0.0, 0.0);
    let (ida, idb) = (a.id, b.id);
    let mut store = DocStore::new();
    store.load_snapshot(vec![a, b], vec![connect(ida, idb), connect(idb, ida)]);
    assert_eq!(store.connections().len(), 1);
}

#[test]
fn remove_connection_by_id() {
    let (mut store, ids) = store_with(2);
    let conn = connect(ids[0], ids[1]);
    store.insert_connection(conn);
    assert_eq!(store.remove_connection(conn.id), Some(conn));
    assert!(store.remove_connection(conn.id).is_none());
}

#[test]
fn connection_count_is_symmetric() {
    let (mut store, ids) = store_with(3);
    store.insert_connection(connect(ids[0], ids[1]));
    store.insert_connection(connect(ids[2], ids[0]));
    assert_eq!(store.connection_count(ids[0]), 2);
    assert_eq!(store.connection_count(ids[1]), 1);
    assert_eq!(store.connection_count(ids[2]), 1);
    assert_eq!(store.connection_count(Uuid::new_v4()), 0);
}

#[test]
fn connected_ids_follow_either_direction() {
    let (mut store, ids) = store_with(3);
    store.insert_connection(connect(ids[0], ids[1]));
    store.insert_connection(connect(ids[2], ids[0]));
    assert_eq!(store.connected_ids(ids[0]), vec![ids[1], ids[2]]);
    assert_eq!(store.connected_ids(ids[2]), vec![ids[0]]);
}

#[test]
fn plan_new_connections_drops_self_repeats_and_existing() {
    let (mut store, ids) = store_with(4);
    store.insert_connection(connect(ids[1], ids[0]));
    let planned = store.plan_new_connections(ids[0], &[ids[0], ids[1], ids[2], ids[2], ids[3]]);
    assert_eq!(planned, vec![ids[2], ids[3]]);
}

#[test]
fn plan_for_brand_new_node_keeps_request_order() {
    let (store, ids) = store_with(3);
    let fresh = Uuid::new_v4();
    assert_eq!(store.plan_new_connections(fresh, &[ids[2], ids[0]]), vec![ids[2], ids[0]]);
}

// =============================================================
// DocStore: reconciliation diff
// =============================================================

#[test]
fn diff_swaps_one_neighbor() {
    // {A, B} -> {B, C}
    let (mut store, ids) = store_with(4);
    let (node, a, b, c) = (ids[0], ids[1], ids[2], ids[3]);
    let to_a = connect(a, node);
    store.insert_connection(to_a);
    store.insert_connection(connect(node, b));

    let diff = store.diff_connections(node, &[b, c]);
    assert_eq!(diff.to_add, vec![c]);
    assert_eq!(diff.to_remove, vec![to_a]);
}

#[test]
fn diff_removal_keeps_stored_direction() {
    let (mut store, ids) = store_with(2);
    let stored = connect(ids[1], ids[0]);
    store.insert_connection(stored);
    let diff = store.diff_connections(ids[0], &[]);
    assert_eq!(diff.to_remove.len(), 1);
    assert_eq!(diff.to_remove[0].from, ids[1]);
    assert_eq!(diff.to_remove[0].to, ids[0]);
}

#[test]
fn diff_with_same_set_is_empty() {
    let (mut store, ids) = store_with(3);
    store.insert_connection(connect(ids[0], ids[1]));
    store.insert_connection(connect(ids[0], ids[2]));
    assert!(store.diff_connections(ids[0], &[ids[2], ids[1]]).is_empty());
}

#[test]
fn diff_ignores_self_in_desired_set() {
    let (store, ids) = store_with(2);
    let diff = store.diff_connections(ids[0], &[ids[0], ids[1]]);
    assert_eq!(diff.to_add, vec![ids[1]]);
    assert!(diff.to_remove.is_empty());
}

#[test]
fn diff_ignores_unrelated_connections() {
    let (mut store, ids) = store_with(3);
    store.insert_connection(connect(ids[1], ids[2]));
    let diff = store.diff_connections(ids[0], &[]);
    assert!(diff.is_empty());
}
