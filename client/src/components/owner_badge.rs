//! Owner avatar and name on public topic cards.

#[cfg(test)]
#[path = "owner_badge_test.rs"]
mod owner_badge_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::types::Owner;
use crate::util::color::initial;

/// Profile page for an owner, if the owner is known.
pub fn owner_href(owner: &Owner) -> Option<String> {
    owner.id.map(|id| format!("/user/{id}"))
}

/// Clickable badge. Rendered inside card links, so it navigates itself
/// instead of nesting an anchor.
#[component]
pub fn OwnerBadge(owner: Owner) -> impl IntoView {
    let navigate = use_navigate();
    let href = owner_href(&owner);
    let letter = initial(&owner.display_name);
    let avatar = owner.avatar_url.clone();
    let name = owner.display_name.clone();

    let on_click = move |ev: leptos::ev::MouseEvent| {
        let Some(href) = href.as_deref() else {
            return;
        };
        ev.prevent_default();
        ev.stop_propagation();
        navigate(href, NavigateOptions::default());
    };

    view! {
        <span class="owner-badge" role="link" title=format!("View {name}'s topics") on:click=on_click>
            {match avatar {
                Some(url) => view! { <img class="owner-badge__avatar" src=url alt=""/> }.into_any(),
                None => view! { <span class="owner-badge__initial">{letter}</span> }.into_any(),
            }}
            <span class="owner-badge__name">{owner.display_name}</span>
        </span>
    }
}
