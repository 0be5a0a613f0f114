//! The map surface: SVG edge layer under absolutely positioned nodes, both
//! inside one scaled container.
//!
//! Everything drawn comes from a `canvas::render::Scene`; configuration
//! (read-only, arrowheads, colors) arrives as props rather than context.

use canvas::camera::Zoom;
use canvas::render::Scene;
use leptos::prelude::*;

use crate::components::connection_line::ConnectionLine;
use crate::components::map_node::{DragCallback, MapNode};

#[component]
pub fn NodeCanvas(
    scene: Memo<Scene>,
    #[prop(into)] zoom: Signal<Zoom>,
    /// `(background, foreground)` topic colors.
    #[prop(into)]
    colors: Signal<(String, String)>,
    on_drag: DragCallback,
) -> impl IntoView {
    let edge_color = Signal::derive(move || colors.get().1);
    let node_ids = move || scene.with(|s| s.nodes.iter().map(|n| n.id).collect::<Vec<_>>());

    view! {
        <div class="node-canvas">
            <div
                class="node-canvas__content"
                style=move || format!("transform: {}; transform-origin: 0 0;", scene.with(|s| s.transform.clone()))
            >
                <svg class="node-canvas__edges" aria-hidden="true">
                    {move || {
                        scene
                            .get()
                            .edges
                            .into_iter()
                            .map(|edge| view! { <ConnectionLine edge=edge color=edge_color/> })
                            .collect_view()
                    }}
                </svg>
                <For each=node_ids key=|id| *id let:id>
                    <MapNode id=id scene=scene zoom=zoom colors=colors on_drag=on_drag/>
                </For>
            </div>
            <Show when=move || scene.with(|s| s.nodes.is_empty())>
                <div class="node-canvas__empty">
                    <p>"This map is empty."</p>
                </div>
            </Show>
        </div>
    }
}
