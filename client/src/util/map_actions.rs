//! Async side of the canvas page: every backend round trip the map makes.
//!
//! SYSTEM CONTEXT
//! ==============
//! `canvas::engine::MapCore` decides *what* should happen and returns an
//! `Action`; the functions here perform the matching network calls. They take
//! the collaborator traits rather than the concrete client so the whole flow
//! runs natively against in-memory mocks.
//!
//! ERROR HANDLING
//! ==============
//! Failures come back as [`MapActionError`]. The page logs the detail and
//! shows [`MapActionError::user_message`]. Connection fan-out has no
//! compensation: a node whose connections partly failed is kept, and the
//! caller refreshes to show what the backend actually stored.

#[cfg(test)]
#[path = "map_actions_test.rs"]
mod map_actions_test;

use canvas::camera::Point;
use canvas::doc::{Connection, DocStore, MapNode, NodeId, PartialMapNode, TopicId};
use futures::future::join_all;

use crate::net::api::{ConnectionsApi, NodesApi, TopicsApi};
use crate::net::error::ApiError;
use crate::net::types::{NewNode, Topic};
use crate::util::notify::failure_message;
use crate::util::validation::{self, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapActionError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{failed} of {requested} connections for node {node} failed")]
    PartialConnections { node: NodeId, requested: usize, failed: usize },
}

impl MapActionError {
    /// Alert text for a failed `action` ("create node", "save changes", …).
    /// Validation problems are shown as-is.
    pub fn user_message(&self, action: &str) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Api(_) | Self::PartialConnections { .. } => failure_message(action),
        }
    }
}

/// Everything the canvas page needs on open.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSnapshot {
    pub topic: Topic,
    pub nodes: Vec<MapNode>,
    pub connections: Vec<Connection>,
}

/// Add-node form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDraft {
    pub title: String,
    pub description: String,
    /// Existing nodes to connect the new one to.
    pub connect_to: Vec<NodeId>,
}

/// Node-details form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeEdit {
    pub title: String,
    pub description: String,
    /// The complete desired neighbor set.
    pub connections: Vec<NodeId>,
}

/// Load topic header, nodes, and connections concurrently.
///
/// `Ok(None)` means the topic does not exist (or is not visible).
pub async fn load_map<A>(api: &A, topic: TopicId) -> Result<Option<MapSnapshot>, ApiError>
where
    A: TopicsApi + NodesApi + ConnectionsApi + ?Sized,
{
    let (header, nodes, connections) =
        futures::try_join!(api.get_topic(topic), api.list_nodes(topic), api.list_connections(topic))?;
    Ok(header.map(|topic| MapSnapshot { topic, nodes, connections }))
}

/// Re-fetch the node and connection lists after a mutation.
pub async fn load_graph<A>(api: &A, topic: TopicId) -> Result<(Vec<MapNode>, Vec<Connection>), ApiError>
where
    A: NodesApi + ConnectionsApi + ?Sized,
{
    futures::try_join!(api.list_nodes(topic), api.list_connections(topic))
}

/// Save a node's final drag position. Failure is logged only; the node keeps
/// its on-screen position either way.
pub async fn persist_position<A: NodesApi + ?Sized>(api: &A, id: NodeId, position: Point) -> bool {
    match api.update_node(id, &PartialMapNode::position(position)).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("persist position for node {id} failed: {e}");
            false
        }
    }
}

/// Create connections from `node` to each target concurrently. Returns how
/// many failed.
async fn connect_all<A: ConnectionsApi + ?Sized>(api: &A, node: NodeId, targets: &[NodeId]) -> usize {
    let results = join_all(targets.iter().map(|target| api.create_connection(node, *target))).await;
    results
        .iter()
        .zip(targets)
        .filter_map(|(result, target)| result.as_ref().err().map(|e| (target, e)))
        .inspect(|(target, e)| log::warn!("connect {node} -> {target} failed: {e}"))
        .count()
}

/// Create a node in `topic`, then connect it to the draft's targets.
///
/// Self and duplicate targets are dropped before any request. When some
/// connections fail the node still exists and
/// [`MapActionError::PartialConnections`] is returned.
pub async fn create_node<A>(api: &A, doc: &DocStore, topic: TopicId, draft: &NodeDraft) -> Result<MapNode, MapActionError>
where
    A: NodesApi + ConnectionsApi + ?Sized,
{
    let title = validation::title(&draft.title)?;
    let node = api.create_node(&NewNode::new(topic, title, draft.description.trim())).await?;

    let targets: Vec<NodeId> = doc
        .plan_new_connections(node.id, &draft.connect_to)
        .into_iter()
        .filter(|id| doc.node(*id).is_some())
        .collect();
    let failed = connect_all(api, node.id, &targets).await;
    if failed > 0 {
        return Err(MapActionError::PartialConnections { node: node.id, requested: targets.len(), failed });
    }
    Ok(node)
}

/// Delete a node. Its connections go with it on the backend.
pub async fn delete_node<A: NodesApi + ?Sized>(api: &A, id: NodeId) -> Result<(), ApiError> {
    api.delete_node(id).await
}

/// Move `node`'s neighbor set to `desired`: one create per added id and one
/// delete per removed row, all concurrent. The first failure is returned after
/// every request has settled.
pub async fn reconcile_connections<A>(api: &A, doc: &DocStore, node: NodeId, desired: &[NodeId]) -> Result<(), MapActionError>
where
    A: ConnectionsApi + ?Sized,
{
    let diff = doc.diff_connections(node, desired);
    if diff.is_empty() {
        return Ok(());
    }
    log::debug!("reconcile {node}: +{} -{}", diff.to_add.len(), diff.to_remove.len());

    let adds = join_all(diff.to_add.iter().map(|target| async move { api.create_connection(node, *target).await.map(drop) }));
    let removes = join_all(diff.to_remove.iter().map(|conn| api.delete_connection(conn.from, conn.to)));
    let (added, removed) = futures::join!(adds, removes);

    let mut first = None;
    for err in added.into_iter().chain(removed).filter_map(Result::err) {
        log::warn!("reconcile connections for {node}: {err}");
        first.get_or_insert(err);
    }
    first.map_or(Ok(()), |err| Err(err.into()))
}

/// Save title/description as a partial update, then reconcile connections.
pub async fn save_node_details<A>(api: &A, doc: &DocStore, id: NodeId, edit: &NodeEdit) -> Result<MapNode, MapActionError>
where
    A: NodesApi + ConnectionsApi + ?Sized,
{
    let title = validation::title(&edit.title)?;
    let patch = PartialMapNode { title: Some(title), description: Some(edit.description.trim().to_owned()), position: None };
    let updated = api.update_node(id, &patch).await?;
    reconcile_connections(api, doc, id, &edit.connections).await?;
    Ok(updated)
}
