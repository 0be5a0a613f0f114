//! One bezier edge in the map's SVG layer.

#[cfg(test)]
#[path = "connection_line_test.rs"]
mod connection_line_test;

use canvas::edge::Arrowhead;
use canvas::render::EdgeView;
use leptos::prelude::*;

/// Triangle pointing along +x with its tip at the origin.
pub const ARROWHEAD_POINTS: &str = "0,0 -10,-5 -10,5";

/// SVG transform placing the arrowhead triangle.
pub fn arrowhead_transform(head: Arrowhead) -> String {
    format!("translate({} {}) rotate({})", head.at.x, head.at.y, head.angle_deg)
}

#[component]
pub fn ConnectionLine(edge: EdgeView, #[prop(into)] color: Signal<String>) -> impl IntoView {
    view! {
        <g class="connection-line" data-connection=edge.connection_id.to_string()>
            <path
                class="connection-line__path"
                d=edge.path
                fill="none"
                stroke=move || color.get()
                stroke-width="2"
                stroke-linecap="round"
            />
            {edge
                .arrowhead
                .map(|head| {
                    view! {
                        <polygon
                            class="connection-line__arrow"
                            points=ARROWHEAD_POINTS
                            transform=arrowhead_transform(head)
                            fill=move || color.get()
                        />
                    }
                })}
        </g>
    }
}
