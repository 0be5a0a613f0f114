//! Wire rows and the typed models built from them.
//!
//! DESIGN
//! ======
//! The backend speaks snake_case rows with nullable columns. Each `*Row`
//! type deserializes exactly what a table or view returns and converts once
//! into the model the rest of the client uses, filling defaults for missing
//! columns. Insert and patch bodies are separate types so a write never sends
//! a column it did not mean to touch.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use canvas::camera::Point;
use canvas::consts::{DEFAULT_NODE_X, DEFAULT_NODE_Y};
use canvas::doc::{Connection, ConnectionId, MapNode, NodeId, TopicId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Display name used when an owner has no profile row.
pub const ANONYMOUS_OWNER: &str = "Anonymous";
/// Icon color for topics stored without one.
pub const DEFAULT_ICON_COLOR: &str = "#3b82f6";
/// Icon background for topics stored without one.
pub const DEFAULT_ICON_BG_COLOR: &str = "rgba(59, 130, 246, 0.13)";

// =============================================================================
// TOPICS
// =============================================================================

/// A learning topic as shown in lists and the map header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: String,
    pub icon_bg_color: String,
    pub icon_color: String,
    pub is_public: bool,
    pub user_id: Option<Uuid>,
    /// ISO-8601 timestamp; sorts chronologically as a string.
    pub created_at: String,
    pub node_count: u32,
}

/// Row from `topics`, `topics_with_counts`, or `public_topics_with_owners`.
#[derive(Clone, Debug, Deserialize)]
pub struct TopicRow {
    pub id: TopicId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon_bg_color: Option<String>,
    #[serde(default)]
    pub icon_color: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub node_count: Option<i64>,
    #[serde(default)]
    pub owner_display_name: Option<String>,
    #[serde(default)]
    pub owner_avatar_url: Option<String>,
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            icon_bg_color: row.icon_bg_color.unwrap_or_else(|| DEFAULT_ICON_BG_COLOR.to_owned()),
            icon_color: row.icon_color.unwrap_or_else(|| DEFAULT_ICON_COLOR.to_owned()),
            is_public: row.is_public.unwrap_or(false),
            user_id: row.user_id,
            created_at: row.created_at.unwrap_or_default(),
            node_count: row.node_count.map_or(0, |n| u32::try_from(n.max(0)).unwrap_or(u32::MAX)),
        }
    }
}

/// Form input for a new topic. The owner is attached by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub icon_bg_color: String,
    pub icon_color: String,
    pub is_public: bool,
}

/// Insert body for `topics`.
#[derive(Clone, Debug, Serialize)]
pub struct TopicInsert<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub icon_bg_color: &'a str,
    pub icon_color: &'a str,
    pub user_id: Uuid,
    pub is_public: bool,
}

impl<'a> TopicInsert<'a> {
    pub fn new(topic: &'a NewTopic, user_id: Uuid) -> Self {
        Self {
            title: &topic.title,
            description: &topic.description,
            icon_bg_color: &topic.icon_bg_color,
            icon_color: &topic.icon_color,
            user_id,
            is_public: topic.is_public,
        }
    }
}

/// Sparse topic update. Only present fields are written.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TopicPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

impl TopicPatch {
    pub fn visibility(is_public: bool) -> Self {
        Self { is_public: Some(is_public), ..Self::default() }
    }
}

/// Who owns a public topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Owner {
    pub id: Option<Uuid>,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

/// A public topic with its owner's profile.
#[derive(Clone, Debug, PartialEq)]
pub struct PublicTopic {
    pub topic: Topic,
    pub owner: Owner,
}

impl From<TopicRow> for PublicTopic {
    fn from(mut row: TopicRow) -> Self {
        let owner = Owner {
            id: row.user_id,
            display_name: row.owner_display_name.take().unwrap_or_else(|| ANONYMOUS_OWNER.to_owned()),
            avatar_url: row.owner_avatar_url.take(),
        };
        Self { topic: row.into(), owner }
    }
}

// =============================================================================
// NODES AND CONNECTIONS
// =============================================================================

/// Row from `learning_nodes`.
#[derive(Clone, Debug, Deserialize)]
pub struct NodeRow {
    pub id: NodeId,
    pub topic_id: TopicId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<Point>,
}

impl From<NodeRow> for MapNode {
    fn from(row: NodeRow) -> Self {
        Self {
            id: row.id,
            topic_id: row.topic_id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            position: row.position.unwrap_or(Point::new(DEFAULT_NODE_X, DEFAULT_NODE_Y)),
            live: None,
        }
    }
}

/// Insert body for `learning_nodes`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewNode {
    pub topic_id: TopicId,
    pub title: String,
    pub description: String,
    pub position: Point,
}

impl NewNode {
    /// A node placed at the default position.
    pub fn new(topic_id: TopicId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            topic_id,
            title: title.into(),
            description: description.into(),
            position: Point::new(DEFAULT_NODE_X, DEFAULT_NODE_Y),
        }
    }
}

/// Row from `node_connections`.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ConnectionRow {
    pub id: ConnectionId,
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
}

impl From<ConnectionRow> for Connection {
    fn from(row: ConnectionRow) -> Self {
        Self { id: row.id, from: row.from_node_id, to: row.to_node_id }
    }
}

/// Insert body for `node_connections`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ConnectionInsert {
    pub from_node_id: NodeId,
    pub to_node_id: NodeId,
}

// =============================================================================
// PROFILES
// =============================================================================

/// Row from `user_profiles`, also used as its insert body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub auth_provider: Option<String>,
}

/// Sparse profile update.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// What visitors may see of someone's profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicProfile {
    pub id: Uuid,
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl From<UserProfile> for PublicProfile {
    fn from(p: UserProfile) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name.filter(|n| !n.is_empty()).unwrap_or_else(|| ANONYMOUS_OWNER.to_owned()),
            avatar_url: p.avatar_url,
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Provider-supplied identity fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default)]
    pub provider: Option<String>,
}

/// The signed-in account as the auth surface reports it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
    #[serde(default)]
    pub app_metadata: AppMetadata,
}

impl AuthUser {
    /// Local part of the email address, if there is one.
    pub fn email_local_part(&self) -> Option<&str> {
        self.email.as_deref().and_then(|e| e.split('@').next()).filter(|s| !s.is_empty())
    }
}

/// An authenticated session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token is past (or within `leeway` seconds of) expiry.
    pub fn is_expired(&self, now_secs: i64, leeway: i64) -> bool {
        self.expires_at.is_some_and(|at| at - leeway <= now_secs)
    }
}

/// Sign-up returns a session when confirmation is off, or only the user when
/// an email confirmation is pending.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum SignUpResponse {
    Session(Session),
    User(AuthUser),
}

/// Supported OAuth providers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }
}

/// Human label for a stored provider name.
pub fn provider_label(provider: Option<&str>) -> &'static str {
    match provider {
        Some("google") => "Google",
        Some("github") => "GitHub",
        _ => "Email",
    }
}

// =============================================================================
// EXPLORE
// =============================================================================

/// Rows per explore page.
pub const EXPLORE_PAGE_SIZE: usize = 12;

/// Sort orders offered on the explore pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExploreSort {
    #[default]
    Newest,
    Oldest,
    Title,
    Nodes,
}

impl ExploreSort {
    pub const ALL: [Self; 4] = [Self::Newest, Self::Oldest, Self::Title, Self::Nodes];

    pub fn value(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Nodes => "nodes",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::Title => "Title A-Z",
            Self::Nodes => "Most nodes",
        }
    }

    pub fn from_value(value: &str) -> Self {
        Self::ALL.into_iter().find(|s| s.value() == value).unwrap_or_default()
    }
}

/// One explore page request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExploreQuery {
    pub search: String,
    pub sort: ExploreSort,
    /// Zero-based page index.
    pub page: usize,
}

/// One page of public topics.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TopicPage {
    pub topics: Vec<PublicTopic>,
    pub has_more: bool,
}
