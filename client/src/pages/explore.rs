//! Explore page: everyone's public topics, searchable and paged.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route `/explore`. Open to visitors. Search input is debounced before it
//! restarts the feed; a sort change restarts it immediately.

use std::future::Future;

use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::topic_feed::TopicFeed;
use crate::net::api::ExploreApi;
use crate::net::error::ApiError;
use crate::net::supabase::SupabaseClient;
use crate::net::types::{ExploreQuery, ExploreSort, TopicPage};
use crate::state::explore::{ExploreFeed, empty_feed_text};

/// Run one feed request and hand the answer to the feed, which ignores it if
/// a newer query has started since.
pub(crate) fn spawn_feed_request<Fut>(feed: RwSignal<ExploreFeed>, generation: u64, query: ExploreQuery, request: Fut)
where
    Fut: Future<Output = Result<TopicPage, ApiError>> + 'static,
{
    leptos::task::spawn_local(async move {
        let result = request.await.map_err(|e| {
            log::error!("load public topics page {}: {e}", query.page);
            e.to_string()
        });
        feed.update(|f| {
            if !f.accept(generation, &query, result) {
                log::debug!("dropped stale public topics page {}", query.page);
            }
        });
    });
}

/// `<select>` for the explore sort orders.
#[component]
pub fn SortSelect(sort: RwSignal<ExploreSort>, options: &'static [ExploreSort]) -> impl IntoView {
    view! {
        <label class="explore-sort">
            <span class="explore-sort__label">"Sort by:"</span>
            <select
                class="explore-sort__select"
                prop:value=move || sort.get().value()
                on:change=move |ev| sort.set(ExploreSort::from_value(&event_target_value(&ev)))
            >
                {options
                    .iter()
                    .map(|option| view! { <option value=option.value()>{option.label()}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn ExplorePage() -> impl IntoView {
    let api = expect_context::<SupabaseClient>();
    let feed = RwSignal::new(ExploreFeed::default());
    let sort = RwSignal::new(ExploreSort::default());
    let search = RwSignal::new(String::new());

    let api_restart = api.clone();
    Effect::new(move || {
        let (search, sort) = (search.get(), sort.get());
        let Some((generation, query)) = feed.try_update(|f| f.restart(&search, sort)) else {
            return;
        };
        let api = api_restart.clone();
        let request_query = query.clone();
        spawn_feed_request(feed, generation, query, async move { api.list_public_topics(&request_query).await });
    });

    let on_load_more = Callback::new(move |()| {
        let Some((generation, query)) = feed.try_update(ExploreFeed::next_page).flatten() else {
            return;
        };
        let api = api.clone();
        let request_query = query.clone();
        spawn_feed_request(feed, generation, query, async move { api.list_public_topics(&request_query).await });
    });

    #[cfg(feature = "csr")]
    let debounce = StoredValue::new_local(None::<gloo_timers::callback::Timeout>);
    let on_search_input = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        feed.update(|f| f.search_input.clone_from(&value));
        #[cfg(feature = "csr")]
        {
            let delay = crate::state::explore::SEARCH_DEBOUNCE_MS;
            // Replacing the stored timer drops, and so cancels, the previous one.
            debounce.set_value(Some(gloo_timers::callback::Timeout::new(delay, move || search.set(value))));
        }
        #[cfg(not(feature = "csr"))]
        {
            search.set(value);
        }
    };

    view! {
        <div class="explore-page">
            <Header/>
            <main class="explore-main">
                <section class="explore-hero">
                    <h1 class="explore-hero__title">"Explore Public Topics"</h1>
                    <p class="explore-hero__subtitle">"Discover learning journeys from the community"</p>
                </section>
                <div class="explore-filters">
                    <input
                        class="search-input explore-search"
                        type="text"
                        placeholder="Search topics..."
                        aria-label="Search topics"
                        prop:value=move || feed.with(|f| f.search_input.clone())
                        on:input=on_search_input
                    />
                    <SortSelect sort=sort options=&ExploreSort::ALL/>
                </div>
                <TopicFeed
                    feed=feed
                    on_load_more=on_load_more
                    empty_text=empty_feed_text
                    end_text="You've seen all public topics"
                />
            </main>
        </div>
    }
}
