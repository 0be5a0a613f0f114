//! One node box on the map, wrapped in its own drag tracker.
//!
//! DESIGN
//! ======
//! Each node owns a `canvas::input::Draggable`. Pressing the handle starts a
//! drag and attaches document-level move/up listeners; every resulting
//! `DragEvent` is reported through `on_drag` and the page routes it into
//! `MapCore`. Clicks anywhere on the node go through the same tracker so the
//! click that ends a drag does not also open the details modal.
//!
//! The node reads its own `NodeView` from the scene by id, so the component
//! (and its drag state) survives the re-renders a drag causes.

use canvas::camera::Zoom;
use canvas::doc::NodeId;
use canvas::input::{DragEvent, Draggable, PointerTarget};
use canvas::render::Scene;
use leptos::prelude::*;

#[cfg(feature = "csr")]
use crate::util::pointer::{self, DocumentDrag};

/// Report of a node's drag or click.
pub type DragCallback = Callback<(NodeId, DragEvent)>;

#[component]
pub fn MapNode(
    id: NodeId,
    scene: Memo<Scene>,
    #[prop(into)] zoom: Signal<Zoom>,
    /// `(background, foreground)` topic colors.
    #[prop(into)]
    colors: Signal<(String, String)>,
    on_drag: DragCallback,
) -> impl IntoView {
    let node = Memo::new(move |_| scene.with(|s| s.nodes.iter().find(|n| n.id == id).cloned()));
    let draggable = StoredValue::new(Draggable::new(true));

    #[cfg(feature = "csr")]
    let listeners = StoredValue::new_local(None::<DocumentDrag>);
    #[cfg(not(feature = "csr"))]
    let _ = zoom;

    let report = move |event: DragEvent| {
        if event != DragEvent::None {
            on_drag.run((id, event));
        }
    };

    // Handles disappear in read-only mode; drags must stop with them.
    Effect::new(move || {
        let disabled = node.with(|n| n.as_ref().is_none_or(|n| !n.show_handle));
        let event = draggable.try_update_value(|d| d.set_disabled(disabled)).unwrap_or(DragEvent::None);
        if event.leaves_drag() {
            untrack(|| report(event));
            #[cfg(feature = "csr")]
            listeners.set_value(None);
        }
    });

    let click = move |target: PointerTarget| {
        let event = draggable.try_update_value(|d| d.click(target)).unwrap_or(DragEvent::None);
        report(event);
    };

    #[cfg(feature = "csr")]
    let begin = move |input: canvas::input::PointerInput| {
        let Some(top_left) = node.with_untracked(|n| n.as_ref().map(|n| n.position)) else {
            return;
        };
        let at = pointer::canvas_point(&input, zoom.get_untracked());
        let event =
            draggable.try_update_value(|d| d.pointer_down(PointerTarget::Handle, at, top_left)).unwrap_or(DragEvent::None);
        if event != DragEvent::Started {
            return;
        }
        report(event);

        let on_move = move |input: canvas::input::PointerInput| {
            let at = pointer::canvas_point(&input, zoom.get_untracked());
            report(draggable.try_update_value(|d| d.pointer_move(at)).unwrap_or(DragEvent::None));
        };
        let on_up = move || {
            let event = draggable.try_update_value(Draggable::pointer_up).unwrap_or(DragEvent::None);
            report(event);
            if event.leaves_drag() {
                // Detach after this dispatch returns; the listener is still running.
                leptos::task::spawn_local(async move { listeners.set_value(None) });
            }
        };
        listeners.set_value(pointer::capture_document(on_move, on_up));
    };

    let on_handle_mouse_down = move |ev: leptos::ev::MouseEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        #[cfg(feature = "csr")]
        begin(pointer::mouse_input(&ev));
    };
    let on_handle_touch_start = move |ev: leptos::ev::TouchEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        #[cfg(feature = "csr")]
        begin(pointer::touch_input(&ev));
    };

    let style = move || {
        let (bg, fg) = colors.get();
        let place = node.with(|n| n.as_ref().map(canvas::render::NodeView::style).unwrap_or_default());
        format!("{place} --node-bg: {bg}; --node-fg: {fg};")
    };
    let field = move |f: fn(&canvas::render::NodeView) -> String| move || node.with(|n| n.as_ref().map(f).unwrap_or_default());

    view! {
        <div
            class="map-node"
            class:map-node--selected=move || node.with(|n| n.as_ref().is_some_and(|n| n.selected))
            style=style
            on:click=move |_| click(PointerTarget::Body)
        >
            <Show when=move || node.with(|n| n.as_ref().is_some_and(|n| n.show_handle))>
                <div
                    class="map-node__handle"
                    title="Drag to move"
                    on:mousedown=on_handle_mouse_down
                    on:touchstart=on_handle_touch_start
                    on:click=move |ev: leptos::ev::MouseEvent| {
                        ev.stop_propagation();
                        click(PointerTarget::Handle);
                    }
                >
                    "⠿"
                </div>
            </Show>
            <h4 class="map-node__title">{field(|n| n.title.clone())}</h4>
            <p class="map-node__description">{field(|n| n.description.clone())}</p>
            <div class="map-node__footer">{field(|n| n.connection_label.clone())}</div>
        </div>
    }
}
