//! Card for one topic in the home and explore grids.
//!
//! DESIGN
//! ======
//! The whole card links to the topic map. Owner actions (visibility, delete)
//! are only rendered when the viewer owns the topic; explore cards show the
//! owner badge instead.

#[cfg(test)]
#[path = "topic_card_test.rs"]
mod topic_card_test;

use leptos::prelude::*;

use crate::components::owner_badge::OwnerBadge;
use crate::components::visibility_toggle::VisibilityToggle;
use crate::net::types::{Owner, Topic};
use crate::state::topics::count_label;
use crate::util::color::initial;

/// Inline style for the topic's colored icon tile.
pub fn icon_style(topic: &Topic) -> String {
    format!("background-color: {}; color: {};", topic.icon_bg_color, topic.icon_color)
}

pub fn topic_href(topic: &Topic) -> String {
    format!("/topic/{}", topic.id)
}

#[component]
pub fn TopicCard(
    topic: Topic,
    /// Hide owner actions.
    #[prop(optional)]
    read_only: bool,
    #[prop(optional)] owner: Option<Owner>,
    #[prop(optional)] on_delete: Option<Callback<Topic>>,
    #[prop(optional)] on_visibility: Option<Callback<(Topic, bool)>>,
) -> impl IntoView {
    let href = topic_href(&topic);
    let style = icon_style(&topic);
    let letter = initial(&topic.title);
    let nodes = count_label(topic.node_count as usize, "node", "nodes");
    let is_public = topic.is_public;
    let show_actions = !read_only && (on_delete.is_some() || on_visibility.is_some());

    let delete_topic = topic.clone();
    let on_delete_click = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        if let Some(cb) = on_delete {
            cb.run(delete_topic.clone());
        }
    };
    let visibility_topic = topic.clone();
    let on_toggle = Callback::new(move |next: bool| {
        if let Some(cb) = on_visibility {
            cb.run((visibility_topic.clone(), next));
        }
    });

    view! {
        <a class="topic-card" href=href>
            <div class="topic-card__top">
                <span class="topic-card__icon" style=style aria-hidden="true">{letter}</span>
                {show_actions
                    .then(|| {
                        view! {
                            <div class="topic-card__actions">
                                <VisibilityToggle is_public=is_public on_toggle=on_toggle/>
                                <button class="topic-card__delete" on:click=on_delete_click title="Delete topic">
                                    "Delete"
                                </button>
                            </div>
                        }
                    })}
            </div>
            <h3 class="topic-card__title">{topic.title.clone()}</h3>
            <p class="topic-card__description">{topic.description.clone()}</p>
            <div class="topic-card__footer">
                <span class="topic-card__count">{nodes}</span>
                {owner.map(|owner| view! { <OwnerBadge owner=owner/> })}
                <span class="topic-card__cta">"Explore map →"</span>
            </div>
        </a>
    }
}
