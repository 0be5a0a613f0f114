//! Canvas page: one topic's nodes and connections.
//!
//! ARCHITECTURE
//! ============
//! The page owns a single `RwSignal<MapState>`. Synchronous decisions (drag
//! routing, zoom, selection, shortcut gating) are delegated to
//! `canvas::engine::MapCore`; the page turns the returned [`Action`]s into
//! backend calls through `util::map_actions`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/topic/:id`. The topic owner edits; everyone else gets the
//! read-only rendering. Drag moves stay local until the drag ends, which
//! issues exactly one position update.
//!
//! ERROR HANDLING
//! ==============
//! A missing topic redirects home. Load failures render an inline error.
//! Create, save, and delete failures are alerted; after any mutation that
//! may have partly reached the backend the node and connection lists are
//! refetched.

#[cfg(test)]
#[path = "topic_map_test.rs"]
mod topic_map_test;

use canvas::doc::{NodeId, TopicId};
use canvas::engine::{Action, Modal};
use canvas::input::{DragEvent, MapShortcut};
use canvas::render::{EdgeCache, Scene, build_scene};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};
use uuid::Uuid;

use crate::components::add_node_modal::AddNodeModal;
use crate::components::map_node::DragCallback;
use crate::components::node_canvas::NodeCanvas;
use crate::components::node_details_modal::NodeDetailsModal;
use crate::components::zoom_controls::ZoomControls;
use crate::net::supabase::SupabaseClient;
use crate::state::auth::AuthState;
use crate::state::map::MapState;
use crate::state::ui::UiState;
use crate::util::keyboard::{KeyPress, install_shortcuts};
use crate::util::map_actions::{self, MapActionError, NodeDraft, NodeEdit, load_graph, load_map, persist_position};
use crate::util::notify::{alert, report_failure};

/// Topic id from the route, if it is a well-formed UUID.
pub fn parse_topic_id(raw: Option<&str>) -> Option<TopicId> {
    raw.and_then(|r| Uuid::parse_str(r.trim()).ok())
}

/// Whether a failed create still left a node on the backend.
pub fn node_survived(result: &Result<canvas::doc::MapNode, MapActionError>) -> bool {
    matches!(result, Ok(_) | Err(MapActionError::PartialConnections { .. }))
}

async fn refresh_graph(api: &SupabaseClient, topic: TopicId, map: RwSignal<MapState>) {
    match load_graph(api, topic).await {
        Ok((nodes, connections)) => map.update(|m| m.core.load_snapshot(nodes, connections)),
        Err(e) => log::error!("refresh map {topic}: {e}"),
    }
}

#[component]
#[allow(clippy::too_many_lines)]
pub fn TopicMapPage() -> impl IntoView {
    let api = expect_context::<SupabaseClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let params = use_params_map();
    let navigate = use_navigate();

    let map = RwSignal::new(MapState::default());
    let busy = RwSignal::new(false);
    let details_rev = RwSignal::new(0_u32);
    let topic_id = Memo::new(move |_| parse_topic_id(params.read().get("id").as_deref()));

    // PHASE: LOAD TOPIC
    // Runs again when the route id changes without unmounting the page.
    let api_load = api.clone();
    let navigate_home = navigate.clone();
    Effect::new(move || {
        let Some(id) = topic_id.get() else {
            navigate_home("/", NavigateOptions::default());
            return;
        };
        map.set(MapState::default());
        let api = api_load.clone();
        let navigate = navigate_home.clone();
        leptos::task::spawn_local(async move {
            match load_map(&api, id).await {
                Ok(Some(snapshot)) => {
                    log::info!("opened topic {id}: {} nodes", snapshot.nodes.len());
                    map.update(|m| {
                        m.core.load_snapshot(snapshot.nodes, snapshot.connections);
                        m.topic = Some(snapshot.topic);
                        m.loading = false;
                    });
                }
                Ok(None) => {
                    log::warn!("topic {id} not found");
                    navigate("/", NavigateOptions::default());
                }
                Err(e) => {
                    log::error!("load topic {id}: {e}");
                    map.update(|m| {
                        m.error = Some(e.to_string());
                        m.loading = false;
                    });
                }
            }
        });
    });

    // PHASE: VISITOR MODE
    // Owner check follows both the loaded topic and the session.
    Effect::new(move || {
        let Some(owner) = map.with(|m| m.topic.as_ref().map(|t| t.user_id)) else {
            return;
        };
        let read_only = auth.with(|a| a.is_visitor_for(owner));
        if map.with_untracked(|m| m.core.is_read_only()) != read_only {
            map.update(|m| m.core.set_read_only(read_only));
        }
    });

    let edge_cache = StoredValue::new(EdgeCache::new());
    let scene = Memo::new(move |_| {
        map.with(|m| {
            edge_cache
                .try_update_value(|cache| {
                    build_scene(&m.core.doc, m.core.zoom(), m.core.selection(), m.render_config(), cache)
                })
                .unwrap_or_else(Scene::default)
        })
    });
    let zoom = Signal::derive(move || map.with(|m| m.core.zoom()));
    let colors = Signal::derive(move || map.with(MapState::colors));
    let read_only = Memo::new(move |_| map.with(|m| m.core.is_read_only()));
    let status = Memo::new(move |_| map.with(|m| (m.loading, m.error_message())));
    let open_modal = Memo::new(move |_| map.with(|m| m.core.modal()));

    let api_drag = api.clone();
    let on_drag: DragCallback = Callback::new(move |(id, event): (NodeId, DragEvent)| {
        let Some(action) = map.try_update(|m| m.core.handle_drag(id, event)) else {
            return;
        };
        if let Action::PersistPosition { id, position } = action {
            let api = api_drag.clone();
            leptos::task::spawn_local(async move {
                persist_position(&api, id, position).await;
            });
        }
    });

    let api_delete = api.clone();
    let delete_node = Callback::new(move |id: NodeId| {
        if busy.get_untracked() || read_only.get_untracked() {
            return;
        }
        busy.set(true);
        let api = api_delete.clone();
        leptos::task::spawn_local(async move {
            match map_actions::delete_node(&api, id).await {
                Ok(()) => {
                    log::info!("deleted node {id}");
                    map.update(|m| {
                        m.core.remove_node(id);
                        m.core.close_modals();
                    });
                }
                Err(e) => report_failure("delete node", &e),
            }
            busy.set(false);
        });
    });

    let api_create = api.clone();
    let on_create = Callback::new(move |draft: NodeDraft| {
        let Some(topic) = topic_id.get_untracked() else {
            return;
        };
        busy.set(true);
        let api = api_create.clone();
        leptos::task::spawn_local(async move {
            let doc = map.with_untracked(|m| m.core.doc.clone());
            let result = map_actions::create_node(&api, &doc, topic, &draft).await;
            match &result {
                Ok(node) => log::info!("created node {} in {topic}", node.id),
                Err(e) => {
                    log::error!("create node in {topic}: {e}");
                    alert(&e.user_message("create node"));
                }
            }
            if node_survived(&result) {
                map.update(|m| {
                    m.core.close_modals();
                });
                refresh_graph(&api, topic, map).await;
            }
            busy.set(false);
        });
    });

    let api_save = api;
    let save_details = Callback::new(move |(id, edit): (NodeId, NodeEdit)| {
        let Some(topic) = topic_id.get_untracked() else {
            return;
        };
        busy.set(true);
        let api = api_save.clone();
        leptos::task::spawn_local(async move {
            let doc = map.with_untracked(|m| m.core.doc.clone());
            match map_actions::save_node_details(&api, &doc, id, &edit).await {
                Ok(_) => {
                    log::info!("saved node {id}");
                    refresh_graph(&api, topic, map).await;
                    details_rev.update(|rev| *rev += 1);
                }
                Err(MapActionError::Validation(e)) => alert(&e.to_string()),
                Err(e) => {
                    log::error!("save node {id}: {e}");
                    alert(&e.user_message("save changes"));
                    refresh_graph(&api, topic, map).await;
                }
            }
            busy.set(false);
        });
    });

    let close_modals = Callback::new(move |()| {
        map.update(|m| {
            m.core.close_modals();
        });
    });
    let zoom_in = Callback::new(move |()| {
        map.update(|m| {
            m.core.zoom_in();
        });
    });
    let zoom_out = Callback::new(move |()| {
        map.update(|m| {
            m.core.zoom_out();
        });
    });

    let ui = expect_context::<RwSignal<UiState>>();
    install_shortcuts(move |key: &KeyPress| {
        // App dialogs (help, settings, account) own the keyboard while open.
        if ui.with_untracked(UiState::any_dialog_open) {
            return false;
        }
        let Some(shortcut) = key.shortcut().and_then(MapShortcut::from_combo) else {
            return false;
        };
        match map.try_update(|m| m.core.apply_shortcut(shortcut, m.loading)) {
            Some(Action::DeleteNode(id)) => {
                delete_node.run(id);
                true
            }
            Some(Action::None) | None => false,
            Some(_) => true,
        }
    });

    let dialog = move || {
        details_rev.track();
        match open_modal.get() {
            Modal::None => ().into_any(),
            Modal::AddNode => {
                let (title, topic_colors, options) = map.with_untracked(|m| {
                    (m.topic.as_ref().map(|t| t.title.clone()).unwrap_or_default(), m.colors(), m.node_options(None))
                });
                view! {
                    <AddNodeModal
                        topic_title=title
                        colors=topic_colors
                        options=options
                        busy=busy
                        on_close=close_modals
                        on_submit=on_create
                    />
                }
                .into_any()
            }
            Modal::NodeDetails(id) => {
                let details = map.with_untracked(|m| {
                    let node = m.core.node(id)?.clone();
                    let connected = m.connected_nodes(id).into_iter().map(|n| (n.id, n.title.clone())).collect::<Vec<_>>();
                    Some((node, connected, m.node_options(Some(id)), m.core.is_read_only()))
                });
                let Some((node, connected, options, node_read_only)) = details else {
                    return ().into_any();
                };
                view! {
                    <NodeDetailsModal
                        node=node
                        connected=connected
                        options=options
                        read_only=node_read_only
                        busy=busy
                        on_close=close_modals
                        on_save=Callback::new(move |edit: NodeEdit| save_details.run((id, edit)))
                        on_delete=delete_node
                    />
                }
                .into_any()
            }
        }
    };

    let go_home = move |_| navigate("/", NavigateOptions::default());

    let body = move || match status.get() {
        (true, _) => view! { <p class="topic-map-canvas__status">"Loading topic map..."</p> }.into_any(),
        (false, Some(message)) => {
            view! { <p class="topic-map-canvas__status topic-map-canvas__status--error">"Error: " {message}</p> }
                .into_any()
        }
        (false, None) => view! { <NodeCanvas scene=scene zoom=zoom colors=colors on_drag=on_drag/> }.into_any(),
    };

    view! {
        <div class="topic-map-page">
            <header class="topic-map-header">
                <div class="topic-map-header__left">
                    <button class="btn back-btn" on:click=go_home>
                        "← Back"
                    </button>
                    {move || {
                        map.with(|m| m.topic.clone())
                            .map(|topic| {
                                let style = format!("background-color: {};", topic.icon_bg_color);
                                view! {
                                    <div class="topic-info">
                                        <span class="topic-info__icon" style=style aria-hidden="true"></span>
                                        <div class="topic-info__text">
                                            <h2 class="topic-info__title">{topic.title}</h2>
                                            <p class="topic-info__description">{topic.description}</p>
                                        </div>
                                    </div>
                                }
                            })
                    }}
                </div>
                <Show when=move || status.with(|(loading, error)| !loading && error.is_none())>
                    <div class="topic-map-header__right">
                        <ZoomControls zoom=zoom on_zoom_in=zoom_in on_zoom_out=zoom_out/>
                        <Show
                            when=move || !read_only.get()
                            fallback=|| view! { <span class="topic-map-header__badge">"View only"</span> }
                        >
                            <button
                                class="btn btn--primary add-node-btn"
                                on:click=move |_| {
                                    map.update(|m| {
                                        m.core.open_add_node();
                                    });
                                }
                            >
                                "+ Add Node"
                            </button>
                        </Show>
                    </div>
                </Show>
            </header>
            <main class="topic-map-canvas">{body}</main>
            {dialog}
        </div>
    }
}
