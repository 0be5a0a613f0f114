//! Document-level pointer tracking for node drags.
//!
//! SYSTEM CONTEXT
//! ==============
//! A drag starts on a node's handle but the pointer can leave the node, so
//! move/up events are captured on the document for as long as the drag lasts.
//! Mouse and touch are folded into `canvas::input::PointerInput` and converted
//! to canvas space before `Draggable` sees them, which keeps the drag math
//! correct at every zoom level.
//!
//! `touchmove` is registered non-passive so it can cancel page scrolling
//! while a node is being dragged.

#[cfg(test)]
#[path = "pointer_test.rs"]
mod pointer_test;

use canvas::camera::{Point, Zoom};
use canvas::input::PointerInput;

/// Pointer position in canvas space at `zoom`.
pub fn canvas_point(input: &PointerInput, zoom: Zoom) -> Point {
    zoom.screen_to_canvas(input.position())
}

#[cfg(feature = "csr")]
pub fn mouse_input(event: &web_sys::MouseEvent) -> PointerInput {
    PointerInput::Mouse { x: f64::from(event.client_x()), y: f64::from(event.client_y()) }
}

#[cfg(feature = "csr")]
pub fn touch_input(event: &web_sys::TouchEvent) -> PointerInput {
    let list = event.touches();
    let points = (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())))
        .collect();
    PointerInput::Touch(points)
}

/// Move/up listeners on the document. Dropping this detaches them.
#[cfg(feature = "csr")]
pub struct DocumentDrag {
    _listeners: Vec<gloo_events::EventListener>,
}

/// Start capturing pointer moves and the release on the whole document.
#[cfg(feature = "csr")]
pub fn capture_document<M, U>(on_move: M, on_up: U) -> Option<DocumentDrag>
where
    M: Fn(PointerInput) + 'static,
    U: Fn() + 'static,
{
    use std::rc::Rc;

    use gloo_events::{EventListener, EventListenerOptions};
    use wasm_bindgen::JsCast;

    let document = web_sys::window()?.document()?;
    let on_move = Rc::new(on_move);
    let on_up = Rc::new(on_up);

    let mouse_move = {
        let on_move = Rc::clone(&on_move);
        EventListener::new(&document, "mousemove", move |event| {
            if let Some(event) = event.dyn_ref::<web_sys::MouseEvent>() {
                on_move(mouse_input(event));
            }
        })
    };
    let touch_move = {
        let on_move = Rc::clone(&on_move);
        EventListener::new_with_options(&document, "touchmove", EventListenerOptions::enable_prevent_default(), move |event| {
            if let Some(touch) = event.dyn_ref::<web_sys::TouchEvent>() {
                event.prevent_default();
                on_move(touch_input(touch));
            }
        })
    };
    let mouse_up = {
        let on_up = Rc::clone(&on_up);
        EventListener::new(&document, "mouseup", move |_| on_up())
    };
    let touch_end = EventListener::new(&document, "touchend", move |_| on_up());

    Some(DocumentDrag { _listeners: vec![mouse_move, touch_move, mouse_up, touch_end] })
}
