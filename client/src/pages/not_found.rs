//! Fallback route for unknown paths and missing users.

use leptos::prelude::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <div class="not-found-page__content">
                <h1 class="not-found-page__title">"404"</h1>
                <p class="not-found-page__message">"Page not found"</p>
                <a class="not-found-page__link" href="/">
                    "Go back home"
                </a>
            </div>
        </div>
    }
}
