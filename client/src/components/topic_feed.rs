//! Paged grid of public topic cards with a load-more control.

use leptos::prelude::*;

use crate::components::topic_card::TopicCard;
use crate::state::explore::ExploreFeed;

#[component]
pub fn TopicFeed(
    feed: RwSignal<ExploreFeed>,
    on_load_more: Callback<()>,
    /// Heading and message for an empty feed, given whether a search is active.
    empty_text: fn(bool) -> (&'static str, &'static str),
    /// Shown under the grid once every page is loaded.
    #[prop(optional)]
    end_text: Option<&'static str>,
) -> impl IntoView {
    let cards = move || {
        feed.with(|f| f.topics.clone())
            .into_iter()
            .map(|public| view! { <TopicCard topic=public.topic read_only=true owner=public.owner/> })
            .collect_view()
    };
    let empty = move || {
        let (title, message) = empty_text(feed.with(ExploreFeed::is_searching));
        view! {
            <div class="explore-empty">
                <h2 class="explore-empty__title">{title}</h2>
                <p class="explore-empty__message">{message}</p>
            </div>
        }
    };

    view! {
        {move || {
            feed.with(|f| f.error.clone())
                .map(|error| {
                    view! {
                        <div class="explore-error">
                            <p>"Failed to load topics: " {error}</p>
                        </div>
                    }
                })
        }}
        <Show
            when=move || !feed.with(|f| f.loading)
            fallback=|| view! { <p class="explore-loading">"Loading topics..."</p> }
        >
            <Show when=move || feed.with(|f| !f.topics.is_empty()) fallback=empty>
                <div class="explore-grid">{cards}</div>
                <Show when=move || feed.with(|f| f.loading_more)>
                    <div class="explore-loading-more">
                        <span>"Loading more topics..."</span>
                    </div>
                </Show>
                <Show when=move || feed.with(|f| f.has_more && !f.loading_more)>
                    <button class="btn explore-load-more" on:click=move |_| on_load_more.run(())>
                        "Load more"
                    </button>
                </Show>
                {move || {
                    end_text
                        .filter(|_| feed.with(ExploreFeed::reached_end))
                        .map(|text| view! { <p class="explore-end">{text}</p> })
                }}
            </Show>
        </Show>
    }
}
