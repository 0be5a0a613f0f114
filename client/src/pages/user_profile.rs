//! One user's public topics, reached from an owner badge.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/user/:id`. The profile row and the topic feed load independently.
//! A user without a profile row still gets a page when they have public
//! topics; only when both come back empty is it a 404.

#[cfg(test)]
#[path = "user_profile_test.rs"]
mod user_profile_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use uuid::Uuid;

use crate::components::header::Header;
use crate::components::topic_feed::TopicFeed;
use crate::net::api::ExploreApi;
use crate::net::supabase::SupabaseClient;
use crate::net::types::{ANONYMOUS_OWNER, ExploreSort, PublicProfile};
use crate::pages::explore::{SortSelect, spawn_feed_request};
use crate::pages::not_found::NotFoundPage;
use crate::state::explore::ExploreFeed;
use crate::state::topics::count_label;
use crate::util::color::initial;

const USER_SORTS: [ExploreSort; 3] = [ExploreSort::Newest, ExploreSort::Oldest, ExploreSort::Title];

/// `"1 public topic"` / `"N public topics"`.
pub fn public_topic_count(count: usize) -> String {
    count_label(count, "public topic", "public topics")
}

/// 404 only once both loads finished with nothing to show.
pub fn user_not_found(profile_loading: bool, topics_loading: bool, has_profile: bool, topic_count: usize) -> bool {
    !profile_loading && !topics_loading && !has_profile && topic_count == 0
}

fn user_empty_text(_searching: bool) -> (&'static str, &'static str) {
    ("No public topics", "This user hasn't shared any public topics yet.")
}

#[component]
pub fn UserProfilePage() -> impl IntoView {
    let api = expect_context::<SupabaseClient>();
    let params = use_params_map();
    let user_id = Memo::new(move |_| params.read().get("id").and_then(|raw| Uuid::parse_str(&raw).ok()));

    let profile = RwSignal::new(None::<PublicProfile>);
    let profile_loading = RwSignal::new(true);
    let feed = RwSignal::new(ExploreFeed::default());
    let sort = RwSignal::new(ExploreSort::default());

    let api_profile = api.clone();
    Effect::new(move || {
        let Some(user) = user_id.get() else {
            profile_loading.set(false);
            return;
        };
        profile_loading.set(true);
        let api = api_profile.clone();
        leptos::task::spawn_local(async move {
            match api.get_public_profile(user).await {
                Ok(found) => profile.set(found),
                Err(e) => {
                    log::error!("load profile {user}: {e}");
                    profile.set(None);
                }
            }
            profile_loading.set(false);
        });
    });

    let api_restart = api.clone();
    Effect::new(move || {
        let (Some(user), sort) = (user_id.get(), sort.get()) else {
            feed.update(|f| f.loading = false);
            return;
        };
        let Some((generation, query)) = feed.try_update(|f| f.restart("", sort)) else {
            return;
        };
        let api = api_restart.clone();
        let request_query = query.clone();
        spawn_feed_request(feed, generation, query, async move {
            api.list_user_public_topics(user, &request_query).await
        });
    });

    let on_load_more = Callback::new(move |()| {
        let Some(user) = user_id.get_untracked() else {
            return;
        };
        let Some((generation, query)) = feed.try_update(ExploreFeed::next_page).flatten() else {
            return;
        };
        let api = api.clone();
        let request_query = query.clone();
        spawn_feed_request(feed, generation, query, async move {
            api.list_user_public_topics(user, &request_query).await
        });
    });

    let not_found = move || {
        user_id.with(Option::is_none)
            || user_not_found(
                profile_loading.get(),
                feed.with(|f| f.loading),
                profile.with(Option::is_some),
                feed.with(|f| f.topics.len()),
            )
    };
    let display_name = move || {
        profile
            .with(|p| p.as_ref().map(|p| p.display_name.clone()))
            .unwrap_or_else(|| ANONYMOUS_OWNER.to_owned())
    };
    let avatar = move || {
        profile.with(|p| p.as_ref().and_then(|p| p.avatar_url.clone())).map_or_else(
            || view! { <div class="user-profile__avatar user-profile__avatar--placeholder">{initial(&display_name())}</div> }.into_any(),
            |src| view! { <img class="user-profile__avatar" src=src alt=""/> }.into_any(),
        )
    };

    view! {
        <Show when=move || !not_found() fallback=|| view! { <NotFoundPage/> }>
            <div class="user-profile-page">
                <Header/>
                <main class="user-profile-main">
                    <nav class="breadcrumb">
                        <a class="breadcrumb__link" href="/explore">
                            "Explore"
                        </a>
                        <span class="breadcrumb__separator">"/"</span>
                        <span class="breadcrumb__current">{display_name}</span>
                    </nav>
                    <div class="user-profile__header">
                        {avatar}
                        <div class="user-profile__info">
                            <h1 class="user-profile__name">{display_name}</h1>
                            <p class="user-profile__count">{move || public_topic_count(feed.with(|f| f.topics.len()))}</p>
                        </div>
                    </div>
                    <div class="user-profile__sort">
                        <SortSelect sort=sort options=&USER_SORTS/>
                    </div>
                    <TopicFeed feed=feed on_load_more=on_load_more empty_text=user_empty_text/>
                </main>
            </div>
        </Show>
    }
}
