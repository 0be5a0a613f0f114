//! Home page listing the user's topics with search, sort, and owner actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the landing route. The topic list lives in the shared
//! `TopicsState` and is refetched whenever the signed-in user changes.
//! Visitors see the same grid read-only.
//!
//! ERROR HANDLING
//! ==============
//! A failed list load replaces the grid with an error banner. Create, delete,
//! and visibility failures are logged and alerted; delete and visibility are
//! applied optimistically and rolled back on failure.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::delete_topic_modal::DeleteTopicModal;
use crate::components::header::Header;
use crate::components::new_topic_modal::NewTopicModal;
use crate::components::topic_card::TopicCard;
use crate::net::api::TopicsApi;
use crate::net::supabase::SupabaseClient;
use crate::net::types::{NewTopic, Topic, TopicPatch};
use crate::state::auth::AuthState;
use crate::state::optimistic::OptimisticCommand;
use crate::state::topics::{HomeSort, PrependTopic, RemoveTopic, SetVisibility, TopicsState, count_label, results_label};
use crate::state::ui::UiState;
use crate::util::keyboard::{HomeShortcut, KeyPress, install_shortcuts};
use crate::util::notify::report_failure;

/// `"3 topics in your collection"`.
pub fn hero_subtitle(count: usize) -> String {
    format!("{} in your collection", count_label(count, "topic", "topics"))
}

/// Heading and message shown when the grid is empty.
pub fn empty_state(searching: bool) -> (&'static str, &'static str) {
    if searching {
        ("No matches found", "No topics match your search. Try a different search term.")
    } else {
        ("Start Your Journey", "Create your first topic to begin mapping your learning path.")
    }
}

fn load_topics(api: SupabaseClient, topics: RwSignal<TopicsState>) {
    topics.update(|t| {
        t.loading = true;
        t.error = None;
    });
    leptos::task::spawn_local(async move {
        match api.list_topics().await {
            Ok(items) => topics.update(|t| {
                t.items = items;
                t.loading = false;
            }),
            Err(e) => {
                log::error!("failed to load topics: {e}");
                topics.update(|t| {
                    t.error = Some(e.to_string());
                    t.loading = false;
                });
            }
        }
    });
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<SupabaseClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let topics = expect_context::<RwSignal<TopicsState>>();

    let show_create = RwSignal::new(false);
    let creating = RwSignal::new(false);
    let pending_delete = RwSignal::new(None::<Topic>);
    let search_input = NodeRef::<leptos::html::Input>::new();

    let read_only = Signal::derive(move || auth.with(|a| a.is_visitor_for(None)));

    // Refetch once the session check settles and on every user change.
    let viewer = Memo::new(move |_| auth.with(|a| (a.loading, a.user_id())));
    let api_load = api.clone();
    Effect::new(move || {
        let (loading, _) = viewer.get();
        if !loading {
            load_topics(api_load.clone(), topics);
        }
    });

    let api_create = api.clone();
    let on_create = Callback::new(move |new_topic: NewTopic| {
        let api = api_create.clone();
        creating.set(true);
        leptos::task::spawn_local(async move {
            match api.create_topic(&new_topic).await {
                Ok(topic) => {
                    log::info!("created topic {}", topic.id);
                    topics.update(|t| {
                        PrependTopic(topic).mutate(&mut t.items);
                    });
                    show_create.set(false);
                }
                Err(e) => report_failure("create topic", &e),
            }
            creating.set(false);
        });
    });

    let api_delete = api.clone();
    let on_confirm_delete = Callback::new(move |topic: Topic| {
        pending_delete.set(None);
        let Some(rollback) = topics.try_update(|t| RemoveTopic(topic.id).apply(&mut t.items)) else {
            return;
        };
        let api = api_delete.clone();
        leptos::task::spawn_local(async move {
            match api.delete_topic(topic.id).await {
                Ok(()) => rollback.commit(),
                Err(e) => {
                    topics.update(|t| rollback.restore(&mut t.items));
                    report_failure("delete topic", &e);
                }
            }
        });
    });

    let api_visibility = api;
    let on_visibility = Callback::new(move |(topic, is_public): (Topic, bool)| {
        let command = SetVisibility { id: topic.id, is_public };
        let Some(rollback) = topics.try_update(|t| command.apply(&mut t.items)) else {
            return;
        };
        let api = api_visibility.clone();
        leptos::task::spawn_local(async move {
            match api.update_topic(topic.id, &TopicPatch::visibility(is_public)).await {
                Ok(_) => rollback.commit(),
                Err(e) => {
                    topics.update(|t| rollback.restore(&mut t.items));
                    report_failure("update visibility", &e);
                }
            }
        });
    });
    let on_delete_request = Callback::new(move |topic: Topic| pending_delete.set(Some(topic)));

    let ui = expect_context::<RwSignal<UiState>>();
    install_shortcuts(move |key: &KeyPress| {
        // App dialogs (help, settings, account) own the keyboard while open.
        if ui.with_untracked(UiState::any_dialog_open) {
            return false;
        }
        let Some(shortcut) = key.shortcut().and_then(HomeShortcut::from_combo) else {
            return false;
        };
        match shortcut {
            HomeShortcut::NewTopic => {
                if !read_only.get_untracked() {
                    show_create.set(true);
                }
                true
            }
            HomeShortcut::FocusSearch => {
                #[cfg(feature = "csr")]
                {
                    if let Some(input) = search_input.get_untracked() {
                        let _ = input.focus();
                    }
                }
                true
            }
            HomeShortcut::Escape => {
                show_create.set(false);
                pending_delete.set(None);
                if topics.with_untracked(TopicsState::is_searching) {
                    topics.update(|t| t.search.clear());
                }
                false
            }
        }
    });

    let visible = Memo::new(move |_| topics.with(TopicsState::visible));
    let total = move || topics.with(|t| t.items.len());

    let grid = move || {
        let items = visible.get();
        if items.is_empty() {
            let searching = topics.with(TopicsState::is_searching);
            let (title, message) = empty_state(searching);
            let show_cta = !searching && !read_only.get();
            return view! {
                <div class="empty-state">
                    <h3 class="empty-state__title">{title}</h3>
                    <p class="empty-state__message">{message}</p>
                    {show_cta
                        .then(|| {
                            view! {
                                <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                                    "+ Create First Topic"
                                </button>
                            }
                        })}
                </div>
            }
            .into_any();
        }
        let read_only = read_only.get();
        view! {
            <div class="topics-grid">
                {items
                    .into_iter()
                    .map(|topic| {
                        view! {
                            <TopicCard
                                topic=topic
                                read_only=read_only
                                on_delete=on_delete_request
                                on_visibility=on_visibility
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any()
    };

    view! {
        <div class="home-page">
            <Header/>
            <Show
                when=move || topics.with(|t| t.error.is_none())
                fallback=move || {
                    view! {
                        <main class="main-content">
                            <h2 class="content-title">"Error"</h2>
                            <p class="content-subtitle content-subtitle--error">
                                "Failed to load topics: " {move || topics.with(|t| t.error.clone().unwrap_or_default())}
                            </p>
                        </main>
                    }
                }
            >
                <section class="hero">
                    <h2 class="hero__headline">"Your Learning Topics"</h2>
                    <p class="hero__subheadline">
                        {move || {
                            if topics.with(|t| t.loading) {
                                "Loading your topics...".to_owned()
                            } else {
                                hero_subtitle(total())
                            }
                        }}
                    </p>
                </section>
                <main class="main-content">
                    <div class="content-actions">
                        <Show when=move || !read_only.get()>
                            <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                                "+ New Topic"
                            </button>
                        </Show>
                    </div>
                    <div class="search-filter">
                        <input
                            node_ref=search_input
                            class="search-input"
                            type="search"
                            placeholder="Search topics..."
                            prop:value=move || topics.with(|t| t.search.clone())
                            on:input=move |ev| topics.update(|t| t.search = event_target_value(&ev))
                        />
                        <select
                            class="sort-select"
                            prop:value=move || topics.with(|t| t.sort.value())
                            on:change=move |ev| topics.update(|t| t.sort = HomeSort::from_value(&event_target_value(&ev)))
                        >
                            {HomeSort::ALL
                                .into_iter()
                                .map(|sort| view! { <option value=sort.value()>{sort.label()}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <Show when=move || topics.with(TopicsState::is_searching)>
                        <p class="search-results-info">
                            {move || topics.with(|t| results_label(visible.with(Vec::len), &t.search))}
                        </p>
                    </Show>
                    <Show
                        when=move || !topics.with(|t| t.loading)
                        fallback=|| view! { <p class="content-loading">"Loading topics..."</p> }
                    >
                        {grid}
                    </Show>
                </main>
            </Show>
            <Show when=move || show_create.get()>
                <NewTopicModal
                    on_close=Callback::new(move |()| show_create.set(false))
                    on_submit=on_create
                    busy=creating
                />
            </Show>
            {move || {
                pending_delete
                    .get()
                    .map(|topic| {
                        view! {
                            <DeleteTopicModal
                                topic=topic
                                on_close=Callback::new(move |()| pending_delete.set(None))
                                on_confirm=on_confirm_delete
                            />
                        }
                    })
            }}
        </div>
    }
}
