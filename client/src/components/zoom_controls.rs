//! Zoom out / level / zoom in buttons for the map toolbar.

use canvas::camera::Zoom;
use canvas::consts::{ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT};
use leptos::prelude::*;

#[component]
pub fn ZoomControls(
    #[prop(into)] zoom: Signal<Zoom>,
    on_zoom_in: Callback<()>,
    on_zoom_out: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="zoom-controls">
            <button
                class="btn zoom-controls__btn"
                title="Zoom out"
                aria-label="Zoom out"
                disabled=move || zoom.get().percent() <= ZOOM_MIN_PERCENT
                on:click=move |_| on_zoom_out.run(())
            >
                "−"
            </button>
            <span class="zoom-controls__level">{move || zoom.get().label()}</span>
            <button
                class="btn zoom-controls__btn"
                title="Zoom in"
                aria-label="Zoom in"
                disabled=move || zoom.get().percent() >= ZOOM_MAX_PERCENT
                on:click=move |_| on_zoom_in.run(())
            >
                "+"
            </button>
        </div>
    }
}
