//! Collaborator traits the pages and actions depend on.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hold a concrete `SupabaseClient`, but orchestration helpers take
//! these traits so they can be driven natively by in-memory mocks. Futures are
//! `?Send` because browser fetches are not.

use async_trait::async_trait;
use canvas::doc::{Connection, MapNode, NodeId, PartialMapNode, TopicId};
use uuid::Uuid;

use super::auth::{SessionListener, Subscription};
use super::error::ApiError;
use super::types::{
    AuthUser, ExploreQuery, NewNode, NewTopic, OAuthProvider, ProfilePatch, PublicProfile, Session, Topic, TopicPage,
    TopicPatch, UserProfile,
};

/// Credential and OAuth authentication with session change notifications.
#[async_trait(?Send)]
pub trait AuthApi {
    /// Register by email. Returns the session when no confirmation is needed.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError>;
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError>;
    async fn sign_out(&self) -> Result<(), ApiError>;
    /// Where to send the browser to start an OAuth sign-in.
    fn oauth_url(&self, provider: OAuthProvider, redirect_to: &str) -> String;
    fn session(&self) -> Option<Session>;
    async fn current_user(&self) -> Result<Option<AuthUser>, ApiError>;
    /// Register a session-change listener. Dropping the handle unsubscribes.
    fn subscribe(&self, listener: SessionListener) -> Subscription;
}

/// Topic rows, with node counts.
#[async_trait(?Send)]
pub trait TopicsApi {
    /// Topics visible to the caller, newest first.
    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError>;
    async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, ApiError>;
    /// Requires a signed-in owner.
    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, ApiError>;
    async fn update_topic(&self, id: TopicId, patch: &TopicPatch) -> Result<Topic, ApiError>;
    /// Cascades to the topic's nodes and connections.
    async fn delete_topic(&self, id: TopicId) -> Result<(), ApiError>;
}

/// Learning nodes within a topic.
#[async_trait(?Send)]
pub trait NodesApi {
    /// Oldest first.
    async fn list_nodes(&self, topic: TopicId) -> Result<Vec<MapNode>, ApiError>;
    async fn get_node(&self, id: NodeId) -> Result<Option<MapNode>, ApiError>;
    async fn create_node(&self, node: &NewNode) -> Result<MapNode, ApiError>;
    async fn update_node(&self, id: NodeId, patch: &PartialMapNode) -> Result<MapNode, ApiError>;
    /// Cascades to the node's connections.
    async fn delete_node(&self, id: NodeId) -> Result<(), ApiError>;
}

/// Connections between nodes.
#[async_trait(?Send)]
pub trait ConnectionsApi {
    /// Every connection touching any node of `topic`.
    async fn list_connections(&self, topic: TopicId) -> Result<Vec<Connection>, ApiError>;
    async fn list_node_connections(&self, node: NodeId) -> Result<Vec<Connection>, ApiError>;
    async fn create_connection(&self, from: NodeId, to: NodeId) -> Result<Connection, ApiError>;
    async fn create_connections(&self, pairs: &[(NodeId, NodeId)]) -> Result<Vec<Connection>, ApiError>;
    /// Delete the row with exactly this `from`/`to` order.
    async fn delete_connection(&self, from: NodeId, to: NodeId) -> Result<(), ApiError>;
    async fn delete_node_connections(&self, node: NodeId) -> Result<(), ApiError>;
}

/// Per-user profile rows.
#[async_trait(?Send)]
pub trait ProfilesApi {
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, ApiError>;
    async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError>;
    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<UserProfile, ApiError>;
}

/// Public topics from every user.
#[async_trait(?Send)]
pub trait ExploreApi {
    async fn list_public_topics(&self, query: &ExploreQuery) -> Result<TopicPage, ApiError>;
    async fn list_user_public_topics(&self, user: Uuid, query: &ExploreQuery) -> Result<TopicPage, ApiError>;
    async fn get_public_profile(&self, user: Uuid) -> Result<Option<PublicProfile>, ApiError>;
}
