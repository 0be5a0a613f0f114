//! `SupabaseClient`: every collaborator trait over the hosted backend.
//!
//! ARCHITECTURE
//! ============
//! Row access goes through `/rest/v1/{table}` using [`Query`]; auth goes
//! through `/auth/v1/*`. Each call is built into a [`RestRequest`] carrying
//! the `apikey` header and a bearer token (the session's access token when
//! signed in, the anon key otherwise) and handed to the [`Transport`].
//!
//! The session lives behind a lock shared by clones of the client. Every
//! change is persisted to `localStorage` and broadcast through
//! [`SessionEvents`].
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError`] via `ApiError::from_response`.
//! Single-row lookups that find nothing return `Ok(None)`. The explore views
//! fall back to the base view when `public_topics_with_owners` is missing.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use canvas::doc::{Connection, MapNode, NodeId, PartialMapNode, TopicId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::api::{AuthApi, ConnectionsApi, ExploreApi, NodesApi, ProfilesApi, TopicsApi};
use super::auth::{self, FragmentTokens, OAuthFragment, SessionEvents, SessionListener, Subscription};
use super::error::ApiError;
use super::postgrest::{Direction, Query, eq_filter, ilike_filter, in_filter};
use super::transport::{HttpTransport, Method, RestRequest, Transport};
use super::types::{
    ANONYMOUS_OWNER, AuthUser, ConnectionInsert, ConnectionRow, EXPLORE_PAGE_SIZE, ExploreQuery, ExploreSort, NewNode,
    NewTopic, NodeRow, OAuthProvider, Owner, ProfilePatch, PublicProfile, PublicTopic, Session, SignUpResponse, Topic,
    TopicInsert, TopicPage, TopicPatch, TopicRow, UserProfile,
};
use crate::config::AppConfig;

pub const TOPICS: &str = "topics";
pub const TOPICS_WITH_COUNTS: &str = "topics_with_counts";
pub const PUBLIC_TOPICS: &str = "public_topics_with_owners";
pub const NODES: &str = "learning_nodes";
pub const CONNECTIONS: &str = "node_connections";
pub const PROFILES: &str = "user_profiles";

/// Refresh a stored session this many seconds before it expires.
const REFRESH_LEEWAY_SECS: i64 = 60;

#[derive(Deserialize)]
struct IdRow {
    id: Uuid,
}

/// Backend client. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct SupabaseClient<T = HttpTransport> {
    base_url: String,
    anon_key: String,
    transport: T,
    session: Arc<RwLock<Option<Session>>>,
    events: SessionEvents,
}

impl SupabaseClient<HttpTransport> {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_transport(config, HttpTransport)
    }
}

impl<T: Transport> SupabaseClient<T> {
    pub fn with_transport(config: &AppConfig, transport: T) -> Self {
        Self {
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            transport,
            session: Arc::new(RwLock::new(None)),
            events: SessionEvents::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    // --- Session ---

    fn current_session(&self) -> Option<Session> {
        self.session.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn access_token(&self) -> Option<String> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.access_token.clone())
    }

    /// Replace the session, persist it, and notify listeners.
    pub fn set_session(&self, session: Option<Session>) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        auth::store_session(session.as_ref());
        self.events.emit(session.as_ref());
    }

    /// Pick up a session at startup: an OAuth redirect fragment wins over a
    /// stored session. Stored sessions near expiry are refreshed.
    ///
    /// # Errors
    ///
    /// Fails only when an OAuth redirect's user lookup fails.
    pub async fn restore_session(&self, fragment: Option<&str>) -> Result<Option<Session>, ApiError> {
        match fragment.and_then(auth::parse_fragment) {
            Some(OAuthFragment::Tokens(tokens)) => {
                let session = self.complete_oauth(tokens).await?;
                self.set_session(Some(session.clone()));
                return Ok(Some(session));
            }
            Some(OAuthFragment::Error(message)) => log::warn!("auth: oauth redirect failed: {message}"),
            None => {}
        }
        let Some(stored) = auth::load_stored_session() else {
            return Ok(None);
        };
        Ok(self.resume(stored, now_secs()).await)
    }

    /// Adopt a previously stored session, refreshing it if it is about to
    /// expire. A session that cannot be refreshed is dropped.
    pub async fn resume(&self, stored: Session, now: i64) -> Option<Session> {
        if !stored.is_expired(now, REFRESH_LEEWAY_SECS) {
            self.set_session(Some(stored.clone()));
            return Some(stored);
        }
        let Some(refresh_token) = stored.refresh_token else {
            self.set_session(None);
            return None;
        };
        match self.refresh_session(&refresh_token).await {
            Ok(session) => Some(session),
            Err(e) => {
                log::warn!("auth: session refresh failed: {e}");
                self.set_session(None);
                None
            }
        }
    }

    /// Trade a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns the backend's rejection or a transport failure.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({ "refresh_token": refresh_token }).to_string();
        let request =
            self.anon_auth_request(Method::Post, "token").with_param("grant_type", "refresh_token").with_body(body);
        let session: Session = serde_json::from_str(&self.execute(request).await?)?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn complete_oauth(&self, tokens: FragmentTokens) -> Result<Session, ApiError> {
        let request = RestRequest::new(Method::Get, "/auth/v1/user")
            .with_header("apikey", &self.anon_key)
            .with_header("Authorization", &format!("Bearer {}", tokens.access_token));
        let user: AuthUser = serde_json::from_str(&self.execute(request).await?)?;
        let expires_at = tokens.expires_at.or_else(|| tokens.expires_in.map(|secs| now_secs() + secs));
        Ok(Session {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires_at,
            expires_in: tokens.expires_in,
            user,
        })
    }

    // --- Request building ---

    fn with_auth_headers(&self, request: RestRequest, bearer: &str) -> RestRequest {
        request.with_header("apikey", &self.anon_key).with_header("Authorization", &format!("Bearer {bearer}"))
    }

    fn authorized(&self, request: RestRequest) -> RestRequest {
        let bearer = self.access_token().unwrap_or_else(|| self.anon_key.clone());
        self.with_auth_headers(request, &bearer)
    }

    /// A row-access request for `query`, authorized as the current caller.
    pub fn rest_request(&self, method: Method, query: Query) -> RestRequest {
        let (path, params) = query.into_parts();
        self.authorized(RestRequest::new(method, path).with_params(params))
    }

    fn auth_request(&self, method: Method, endpoint: &str) -> RestRequest {
        self.authorized(RestRequest::new(method, format!("/auth/v1/{endpoint}")))
    }

    /// Credential endpoints always authorize with the anon key.
    fn anon_auth_request(&self, method: Method, endpoint: &str) -> RestRequest {
        self.with_auth_headers(RestRequest::new(method, format!("/auth/v1/{endpoint}")), &self.anon_key)
    }

    // --- Execution ---

    async fn execute(&self, request: RestRequest) -> Result<String, ApiError> {
        let response = self.transport.send(&self.base_url, request).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(ApiError::from_response(response.status, &response.body))
        }
    }

    async fn fetch_rows<R: DeserializeOwned>(&self, query: Query) -> Result<Vec<R>, ApiError> {
        let body = self.execute(self.rest_request(Method::Get, query)).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch_first<R: DeserializeOwned>(&self, query: Query) -> Result<Option<R>, ApiError> {
        Ok(self.fetch_rows(query.limit(1)).await?.into_iter().next())
    }

    async fn write_rows<B, R>(&self, method: Method, query: Query, body: &B) -> Result<Vec<R>, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let request = self
            .rest_request(method, query)
            .with_header("Prefer", "return=representation")
            .with_body(serde_json::to_string(body)?);
        let body = self.execute(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn write_one<B, R>(&self, method: Method, query: Query, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.write_rows(method, query, body).await?.into_iter().next().ok_or(ApiError::NotFound)
    }

    async fn delete_rows(&self, query: Query) -> Result<(), ApiError> {
        self.execute(self.rest_request(Method::Delete, query)).await.map(|_| ())
    }

    // --- Explore ---

    async fn public_page(&self, owner: Option<Uuid>, query: &ExploreQuery) -> Result<TopicPage, ApiError> {
        let view = explore_query(Query::table(PUBLIC_TOPICS).select("*"), owner, query);
        match self.fetch_rows::<TopicRow>(view).await {
            Ok(rows) => Ok(paginate(rows.into_iter().map(PublicTopic::from).collect())),
            Err(e) if e.is_missing_relation() => {
                log::warn!("explore: {PUBLIC_TOPICS} is missing, using {TOPICS_WITH_COUNTS}");
                self.public_page_fallback(owner, query).await
            }
            Err(e) => Err(e),
        }
    }

    async fn public_page_fallback(&self, owner: Option<Uuid>, query: &ExploreQuery) -> Result<TopicPage, ApiError> {
        let base = Query::table(TOPICS_WITH_COUNTS).select("*").eq("is_public", true);
        let rows: Vec<TopicRow> = self.fetch_rows(explore_query(base, owner, query)).await?;
        let topics: Vec<Topic> = rows.into_iter().map(Topic::from).collect();
        let profiles = self.owner_profiles(&topics).await?;

        let public = topics
            .into_iter()
            .map(|topic| {
                let owner = match topic.user_id.and_then(|id| profiles.get(&id)) {
                    Some(p) => Owner { id: Some(p.id), display_name: p.display_name.clone(), avatar_url: p.avatar_url.clone() },
                    None => Owner { id: topic.user_id, display_name: ANONYMOUS_OWNER.to_owned(), avatar_url: None },
                };
                PublicTopic { topic, owner }
            })
            .collect();
        Ok(paginate(public))
    }

    async fn owner_profiles(&self, topics: &[Topic]) -> Result<HashMap<Uuid, PublicProfile>, ApiError> {
        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = topics.iter().filter_map(|t| t.user_id).filter(|id| seen.insert(*id)).collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows: Vec<UserProfile> =
            self.fetch_rows(Query::table(PROFILES).select("id,display_name,avatar_url").in_list("id", &ids)).await?;
        Ok(rows.into_iter().map(|p| (p.id, PublicProfile::from(p))).collect())
    }
}

/// Column and direction for an explore sort.
pub fn sort_order(sort: ExploreSort) -> (&'static str, Direction) {
    match sort {
        ExploreSort::Newest => ("created_at", Direction::Desc),
        ExploreSort::Oldest => ("created_at", Direction::Asc),
        ExploreSort::Title => ("title", Direction::Asc),
        ExploreSort::Nodes => ("node_count", Direction::Desc),
    }
}

/// Filters, sort, and a one-row-over range for `has_more` detection.
fn explore_query(base: Query, owner: Option<Uuid>, query: &ExploreQuery) -> Query {
    let mut q = base;
    if let Some(owner) = owner {
        q = q.eq("user_id", owner);
    }
    let term = query.search.trim();
    if !term.is_empty() {
        q = q.or(&[ilike_filter("title", term), ilike_filter("description", term)]);
    }
    let (column, direction) = sort_order(query.sort);
    let from = query.page * EXPLORE_PAGE_SIZE;
    q.order(column, direction).range(from, from + EXPLORE_PAGE_SIZE)
}

fn paginate(mut topics: Vec<PublicTopic>) -> TopicPage {
    let has_more = topics.len() > EXPLORE_PAGE_SIZE;
    topics.truncate(EXPLORE_PAGE_SIZE);
    TopicPage { topics, has_more }
}

#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        (js_sys::Date::now() / 1000.0) as i64
    }
    #[cfg(not(feature = "csr"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
    }
}

// =============================================================================
// COLLABORATORS
// =============================================================================

#[async_trait(?Send)]
impl<T: Transport> AuthApi for SupabaseClient<T> {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<Session>, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        let request = self.anon_auth_request(Method::Post, "signup").with_body(body);
        match serde_json::from_str(&self.execute(request).await?)? {
            SignUpResponse::Session(session) => {
                self.set_session(Some(session.clone()));
                Ok(Some(session))
            }
            SignUpResponse::User(_) => Ok(None),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password }).to_string();
        let request = self.anon_auth_request(Method::Post, "token").with_param("grant_type", "password").with_body(body);
        let session: Session = serde_json::from_str(&self.execute(request).await?)?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        let result = if self.access_token().is_some() {
            self.execute(self.auth_request(Method::Post, "logout")).await.map(|_| ())
        } else {
            Ok(())
        };
        // The local session goes regardless; an expired token is already signed out.
        self.set_session(None);
        match result {
            Err(ApiError::Unauthenticated) => Ok(()),
            other => other,
        }
    }

    fn oauth_url(&self, provider: OAuthProvider, redirect_to: &str) -> String {
        format!(
            "{}/auth/v1/authorize?provider={}&redirect_to={}",
            self.base_url,
            provider.as_str(),
            auth::encode_component(redirect_to)
        )
    }

    fn session(&self) -> Option<Session> {
        self.current_session()
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, ApiError> {
        if self.access_token().is_none() {
            return Ok(None);
        }
        match self.execute(self.auth_request(Method::Get, "user")).await {
            Ok(body) => Ok(Some(serde_json::from_str(&body)?)),
            Err(ApiError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn subscribe(&self, listener: SessionListener) -> Subscription {
        self.events.subscribe(listener)
    }
}

#[async_trait(?Send)]
impl<T: Transport> TopicsApi for SupabaseClient<T> {
    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        let rows: Vec<TopicRow> =
            self.fetch_rows(Query::table(TOPICS_WITH_COUNTS).select("*").order("created_at", Direction::Desc)).await?;
        Ok(rows.into_iter().map(Topic::from).collect())
    }

    async fn get_topic(&self, id: TopicId) -> Result<Option<Topic>, ApiError> {
        let row: Option<TopicRow> = self.fetch_first(Query::table(TOPICS).select("*").eq("id", id)).await?;
        Ok(row.map(Topic::from))
    }

    async fn create_topic(&self, topic: &NewTopic) -> Result<Topic, ApiError> {
        let owner = self.current_session().map(|s| s.user.id).ok_or(ApiError::Unauthenticated)?;
        let row: TopicRow = self.write_one(Method::Post, Query::table(TOPICS), &TopicInsert::new(topic, owner)).await?;
        Ok(row.into())
    }

    async fn update_topic(&self, id: TopicId, patch: &TopicPatch) -> Result<Topic, ApiError> {
        let row: TopicRow = self.write_one(Method::Patch, Query::table(TOPICS).eq("id", id), patch).await?;
        Ok(row.into())
    }

    async fn delete_topic(&self, id: TopicId) -> Result<(), ApiError> {
        self.delete_rows(Query::table(TOPICS).eq("id", id)).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> NodesApi for SupabaseClient<T> {
    async fn list_nodes(&self, topic: TopicId) -> Result<Vec<MapNode>, ApiError> {
        let query = Query::table(NODES).select("*").eq("topic_id", topic).order("created_at", Direction::Asc);
        let rows: Vec<NodeRow> = self.fetch_rows(query).await?;
        Ok(rows.into_iter().map(MapNode::from).collect())
    }

    async fn get_node(&self, id: NodeId) -> Result<Option<MapNode>, ApiError> {
        let row: Option<NodeRow> = self.fetch_first(Query::table(NODES).select("*").eq("id", id)).await?;
        Ok(row.map(MapNode::from))
    }

    async fn create_node(&self, node: &NewNode) -> Result<MapNode, ApiError> {
        let row: NodeRow = self.write_one(Method::Post, Query::table(NODES), node).await?;
        Ok(row.into())
    }

    async fn update_node(&self, id: NodeId, patch: &PartialMapNode) -> Result<MapNode, ApiError> {
        let row: NodeRow = self.write_one(Method::Patch, Query::table(NODES).eq("id", id), patch).await?;
        Ok(row.into())
    }

    async fn delete_node(&self, id: NodeId) -> Result<(), ApiError> {
        self.delete_rows(Query::table(NODES).eq("id", id)).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> ConnectionsApi for SupabaseClient<T> {
    async fn list_connections(&self, topic: TopicId) -> Result<Vec<Connection>, ApiError> {
        let ids: Vec<IdRow> = self.fetch_rows(Query::table(NODES).select("id").eq("topic_id", topic)).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<NodeId> = ids.into_iter().map(|r| r.id).collect();
        let query = Query::table(CONNECTIONS)
            .select("*")
            .or(&[in_filter("from_node_id", &ids), in_filter("to_node_id", &ids)]);
        let rows: Vec<ConnectionRow> = self.fetch_rows(query).await?;
        Ok(rows.into_iter().map(Connection::from).collect())
    }

    async fn list_node_connections(&self, node: NodeId) -> Result<Vec<Connection>, ApiError> {
        let rows: Vec<ConnectionRow> = self.fetch_rows(touching(node).select("*")).await?;
        Ok(rows.into_iter().map(Connection::from).collect())
    }

    async fn create_connection(&self, from: NodeId, to: NodeId) -> Result<Connection, ApiError> {
        let body = ConnectionInsert { from_node_id: from, to_node_id: to };
        let row: ConnectionRow = self.write_one(Method::Post, Query::table(CONNECTIONS), &body).await?;
        Ok(row.into())
    }

    async fn create_connections(&self, pairs: &[(NodeId, NodeId)]) -> Result<Vec<Connection>, ApiError> {
        if pairs.is_empty() {
            return Ok(Vec::new());
        }
        let body: Vec<ConnectionInsert> =
            pairs.iter().map(|&(from, to)| ConnectionInsert { from_node_id: from, to_node_id: to }).collect();
        let rows: Vec<ConnectionRow> = self.write_rows(Method::Post, Query::table(CONNECTIONS), &body).await?;
        Ok(rows.into_iter().map(Connection::from).collect())
    }

    async fn delete_connection(&self, from: NodeId, to: NodeId) -> Result<(), ApiError> {
        self.delete_rows(Query::table(CONNECTIONS).eq("from_node_id", from).eq("to_node_id", to)).await
    }

    async fn delete_node_connections(&self, node: NodeId) -> Result<(), ApiError> {
        self.delete_rows(touching(node)).await
    }
}

/// Connections with `node` at either end.
fn touching(node: NodeId) -> Query {
    Query::table(CONNECTIONS).or(&[eq_filter("from_node_id", node), eq_filter("to_node_id", node)])
}

#[async_trait(?Send)]
impl<T: Transport> ProfilesApi for SupabaseClient<T> {
    async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, ApiError> {
        self.fetch_first(Query::table(PROFILES).select("*").eq("id", id)).await
    }

    async fn create_profile(&self, profile: &UserProfile) -> Result<UserProfile, ApiError> {
        self.write_one(Method::Post, Query::table(PROFILES), profile).await
    }

    async fn update_profile(&self, id: Uuid, patch: &ProfilePatch) -> Result<UserProfile, ApiError> {
        self.write_one(Method::Patch, Query::table(PROFILES).eq("id", id), patch).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> ExploreApi for SupabaseClient<T> {
    async fn list_public_topics(&self, query: &ExploreQuery) -> Result<TopicPage, ApiError> {
        self.public_page(None, query).await
    }

    async fn list_user_public_topics(&self, user: Uuid, query: &ExploreQuery) -> Result<TopicPage, ApiError> {
        self.public_page(Some(user), query).await
    }

    async fn get_public_profile(&self, user: Uuid) -> Result<Option<PublicProfile>, ApiError> {
        let row: Option<UserProfile> =
            self.fetch_first(Query::table(PROFILES).select("id,display_name,avatar_url").eq("id", user)).await?;
        Ok(row.map(PublicProfile::from))
    }
}
