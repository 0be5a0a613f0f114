#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::doc::{Connection, MapNode};

fn make_node(x: f64, y: f64, title: &str) -> MapNode {
    MapNode {
        id: Uuid::new_v4(),
        topic_id: Uuid::nil(),
        title: title.into(),
        description: format!("about {title}"),
        position: Point::new(x, y),
        live: None,
    }
}

fn connect(from: NodeId, to: NodeId) -> Connection {
    Connection { id: Uuid::new_v4(), from, to }
}

fn three_node_doc() -> (DocStore, Vec<NodeId>, Vec<Connection>) {
    let nodes = vec![make_node(0.0, 0.0, "a"), make_node(400.0, 0.0, "b"), make_node(0.0, 400.0, "c")];
    let ids: Vec<NodeId> = nodes.iter().map(|n| n.id).collect();
    let conns = vec![connect(ids[0], ids[1]), connect(ids[0], ids[2])];
    let mut doc = DocStore::new();
    doc.load_snapshot(nodes, conns.clone());
    (doc, ids, conns)
}

// =============================================================
// Labels
// =============================================================

#[test]
fn connection_label_pluralizes() {
    assert_eq!(connection_label(0), "0 connections");
    assert_eq!(connection_label(1), "1 connection");
    assert_eq!(connection_label(7), "7 connections");
}

// =============================================================
// Scene
// =============================================================

#[test]
fn empty_topic_builds_empty_scene() {
    let mut cache = EdgeCache::new();
    let scene = build_scene(&DocStore::new(), Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert!(scene.is_empty());
    assert_eq!(scene.transform, "scale(1)");
    assert!(cache.is_empty());
}

#[test]
fn scene_lists_edges_and_nodes() {
    let (doc, ids, conns) = three_node_doc();
    let mut cache = EdgeCache::new();
    let scene = build_scene(&doc, Zoom::from_percent(150), Some(ids[1]), RenderConfig::default(), &mut cache);

    assert_eq!(scene.transform, "scale(1.5)");
    assert_eq!(scene.edges.len(), 2);
    assert_eq!(scene.edges[0].connection_id, conns[0].id);
    assert_eq!(scene.nodes.len(), 3);

    let a = &scene.nodes[0];
    assert_eq!(a.title, "a");
    assert_eq!(a.description, "about a");
    assert_eq!(a.connection_label, "2 connections");
    assert!(a.show_handle);
    assert!(!a.selected);
    assert_eq!(scene.nodes[1].connection_label, "1 connection");
    assert!(scene.nodes[1].selected);
}

#[test]
fn edge_path_matches_geometry() {
    let (doc, _, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    let scene = build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    let expected = EdgeGeometry::between(Point::new(0.0, 0.0), Point::new(400.0, 0.0)).path_data();
    assert_eq!(scene.edges[0].path, expected);
    assert!(scene.edges[0].arrowhead.is_none());
}

#[test]
fn arrowheads_only_when_enabled() {
    let (doc, _, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    let config = RenderConfig { read_only: false, show_arrowheads: true };
    let scene = build_scene(&doc, Zoom::default(), None, config, &mut cache);
    assert!(scene.edges.iter().all(|e| e.arrowhead.is_some()));
}

#[test]
fn read_only_hides_handles() {
    let (doc, _, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    let config = RenderConfig { read_only: true, show_arrowheads: false };
    let scene = build_scene(&doc, Zoom::default(), None, config, &mut cache);
    assert!(scene.nodes.iter().all(|n| !n.show_handle));
}

#[test]
fn dangling_connections_are_skipped() {
    let (mut doc, ids, _) = three_node_doc();
    doc.insert_connection(connect(ids[1], Uuid::new_v4()));
    let mut cache = EdgeCache::new();
    let scene = build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(scene.edges.len(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn edges_follow_live_positions() {
    let (mut doc, ids, _) = three_node_doc();
    doc.set_live_position(ids[1], Point::new(600.0, 100.0));
    let mut cache = EdgeCache::new();
    let scene = build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    let expected = EdgeGeometry::between(Point::new(0.0, 0.0), Point::new(600.0, 100.0)).path_data();
    assert_eq!(scene.edges[0].path, expected);
    assert_eq!(scene.nodes[1].position, Point::new(600.0, 100.0));
    assert_eq!(scene.nodes[1].style(), "left: 600px; top: 100px;");
}

// =============================================================
// Edge cache
// =============================================================

#[test]
fn cache_recomputes_only_moved_edges() {
    let (mut doc, ids, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.misses(), 2);

    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.misses(), 2);

    // moving c touches only the a-c edge
    doc.set_live_position(ids[2], Point::new(10.0, 410.0));
    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.misses(), 3);
}

#[test]
fn cache_drops_removed_connections() {
    let (mut doc, ids, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.len(), 2);

    doc.remove_node(ids[2]);
    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.len(), 1);
}

#[test]
fn zoom_does_not_invalidate_cache() {
    let (doc, _, _) = three_node_doc();
    let mut cache = EdgeCache::new();
    build_scene(&doc, Zoom::default(), None, RenderConfig::default(), &mut cache);
    build_scene(&doc, Zoom::from_percent(200), None, RenderConfig::default(), &mut cache);
    assert_eq!(cache.misses(), 2);
}
