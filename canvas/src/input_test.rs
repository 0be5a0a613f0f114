#![allow(clippy::float_cmp)]

use super::*;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================
// Pointer normalization
// =============================================================

#[test]
fn mouse_position_passes_through() {
    assert_eq!(PointerInput::Mouse { x: 12.0, y: 34.0 }.position(), p(12.0, 34.0));
}

#[test]
fn touch_uses_first_point() {
    let input = PointerInput::Touch(vec![p(5.0, 6.0), p(100.0, 200.0)]);
    assert_eq!(input.position(), p(5.0, 6.0));
}

#[test]
fn touch_without_points_defaults_to_origin() {
    assert_eq!(PointerInput::Touch(Vec::new()).position(), p(0.0, 0.0));
    assert_eq!(normalize_touch(&[]), Point::default());
}

// =============================================================
// Draggable: starting
// =============================================================

#[test]
fn draggable_starts_idle() {
    let drag = Draggable::new(false);
    assert_eq!(drag.state(), DragState::Idle);
    assert!(!drag.is_dragging());
    assert!(drag.live_position().is_none());
}

#[test]
fn pointer_down_on_handle_starts_drag_with_offset() {
    let mut drag = Draggable::new(false);
    let ev = drag.pointer_down(PointerTarget::Handle, p(130.0, 215.0), p(100.0, 200.0));
    assert_eq!(ev, DragEvent::Started);
    assert_eq!(drag.state(), DragState::Dragging { offset: p(30.0, 15.0), live: None });
}

#[test]
fn pointer_down_on_body_does_not_drag() {
    let mut drag = Draggable::new(false);
    let ev = drag.pointer_down(PointerTarget::Body, p(130.0, 215.0), p(100.0, 200.0));
    assert_eq!(ev, DragEvent::None);
    assert!(!drag.is_dragging());
}

#[test]
fn disabled_draggable_ignores_pointer_down() {
    let mut drag = Draggable::new(true);
    let ev = drag.pointer_down(PointerTarget::Handle, p(0.0, 0.0), p(0.0, 0.0));
    assert_eq!(ev, DragEvent::None);
    assert!(!drag.is_dragging());
}

#[test]
fn second_pointer_down_while_dragging_is_ignored() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));
    let ev = drag.pointer_down(PointerTarget::Handle, p(50.0, 50.0), p(0.0, 0.0));
    assert_eq!(ev, DragEvent::None);
    assert_eq!(drag.state(), DragState::Dragging { offset: p(10.0, 10.0), live: None });
}

// =============================================================
// Draggable: moving and releasing
// =============================================================

#[test]
fn pointer_move_reports_pointer_minus_offset() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(130.0, 215.0), p(100.0, 200.0));
    assert_eq!(drag.pointer_move(p(230.0, 315.0)), DragEvent::Moved(p(200.0, 300.0)));
    assert_eq!(drag.live_position(), Some(p(200.0, 300.0)));
}

#[test]
fn pointer_move_when_idle_is_ignored() {
    let mut drag = Draggable::new(false);
    assert_eq!(drag.pointer_move(p(5.0, 5.0)), DragEvent::None);
}

#[test]
fn release_after_moves_ends_once_with_last_position() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));

    let mut ended = Vec::new();
    for step in 1..=5 {
        let ev = drag.pointer_move(p(10.0 + f64::from(step) * 10.0, 10.0));
        assert!(matches!(ev, DragEvent::Moved(_)));
        if let DragEvent::Ended(pos) = ev {
            ended.push(pos);
        }
    }
    if let DragEvent::Ended(pos) = drag.pointer_up() {
        ended.push(pos);
    }

    assert_eq!(ended, vec![p(50.0, 0.0)]);
    assert!(!drag.is_dragging());
    assert!(drag.live_position().is_none());
}

#[test]
fn release_without_move_reports_released() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));
    let ev = drag.pointer_up();
    assert_eq!(ev, DragEvent::Released);
    assert!(ev.leaves_drag());
    assert!(!drag.is_dragging());
}

#[test]
fn pointer_up_when_idle_is_ignored() {
    let mut drag = Draggable::new(false);
    assert_eq!(drag.pointer_up(), DragEvent::None);
    assert!(!DragEvent::None.leaves_drag());
}

#[test]
fn ended_leaves_drag() {
    assert!(DragEvent::Ended(p(1.0, 1.0)).leaves_drag());
    assert!(!DragEvent::Moved(p(1.0, 1.0)).leaves_drag());
    assert!(!DragEvent::Started.leaves_drag());
}

#[test]
fn disabling_mid_drag_abandons_gesture() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));
    drag.pointer_move(p(40.0, 40.0));
    let event = drag.set_disabled(true);
    assert_eq!(event, DragEvent::Released);
    assert!(event.leaves_drag());
    assert!(drag.is_disabled());
    assert!(!drag.is_dragging());
    assert_eq!(drag.pointer_up(), DragEvent::None);
}

#[test]
fn disabling_while_idle_reports_nothing() {
    let mut drag = Draggable::new(false);
    assert_eq!(drag.set_disabled(true), DragEvent::None);
    assert_eq!(drag.set_disabled(false), DragEvent::None);
    assert!(!drag.is_disabled());
}

// =============================================================
// Draggable: clicks
// =============================================================

#[test]
fn body_click_without_drag_selects() {
    let mut drag = Draggable::new(false);
    assert_eq!(drag.click(PointerTarget::Body), DragEvent::Select);
}

#[test]
fn handle_click_does_not_select() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));
    assert_eq!(drag.pointer_up(), DragEvent::Released);
    assert_eq!(drag.click(PointerTarget::Handle), DragEvent::None);
}

#[test]
fn click_after_real_drag_is_swallowed_once() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(10.0, 10.0), p(0.0, 0.0));
    drag.pointer_move(p(60.0, 60.0));
    assert!(matches!(drag.pointer_up(), DragEvent::Ended(_)));

    assert_eq!(drag.click(PointerTarget::Body), DragEvent::None);
    assert_eq!(drag.click(PointerTarget::Body), DragEvent::Select);
}

#[test]
fn new_drag_clears_stale_click_suppression() {
    let mut drag = Draggable::new(false);
    drag.pointer_down(PointerTarget::Handle, p(0.0, 0.0), p(0.0, 0.0));
    drag.pointer_move(p(5.0, 5.0));
    drag.pointer_up();
    drag.pointer_down(PointerTarget::Handle, p(0.0, 0.0), p(0.0, 0.0));
    drag.pointer_up();
    assert_eq!(drag.click(PointerTarget::Body), DragEvent::Select);
}

#[test]
fn disabled_node_selects_from_anywhere() {
    let mut drag = Draggable::new(true);
    assert_eq!(drag.click(PointerTarget::Handle), DragEvent::Select);
    assert_eq!(drag.click(PointerTarget::Body), DragEvent::Select);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn modifiers_default_all_false() {
    let m = Modifiers::default();
    assert!(!m.shift);
    assert!(!m.ctrl);
    assert!(!m.alt);
    assert!(!m.meta);
}

#[test]
fn combo_plain_key() {
    assert_eq!(shortcut_combo("Escape", Modifiers::default(), false), "Escape");
    assert_eq!(shortcut_combo("-", Modifiers::default(), false), "-");
}

#[test]
fn combo_ctrl_on_linux() {
    let mods = Modifiers { ctrl: true, ..Modifiers::default() };
    assert_eq!(shortcut_combo("n", mods, false), "Ctrl+n");
}

#[test]
fn combo_cmd_maps_to_ctrl_on_mac() {
    let cmd = Modifiers { meta: true, ..Modifiers::default() };
    assert_eq!(shortcut_combo("n", cmd, true), "Ctrl+n");
    // Ctrl alone on a Mac is not the primary modifier
    let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
    assert_eq!(shortcut_combo("n", ctrl, true), "n");
}

#[test]
fn combo_orders_modifiers() {
    let mods = Modifiers { shift: true, ctrl: true, alt: true, meta: false };
    assert_eq!(shortcut_combo("x", mods, false), "Ctrl+Shift+Alt+x");
}

#[test]
fn combo_names_space() {
    assert_eq!(shortcut_combo(" ", Modifiers::default(), false), "Space");
}

#[test]
fn map_shortcuts_from_combo() {
    assert_eq!(MapShortcut::from_combo("Ctrl+n"), Some(MapShortcut::NewNode));
    assert_eq!(MapShortcut::from_combo("+"), Some(MapShortcut::ZoomIn));
    assert_eq!(MapShortcut::from_combo("Shift++"), Some(MapShortcut::ZoomIn));
    assert_eq!(MapShortcut::from_combo("="), Some(MapShortcut::ZoomIn));
    assert_eq!(MapShortcut::from_combo("-"), Some(MapShortcut::ZoomOut));
    assert_eq!(MapShortcut::from_combo("Escape"), Some(MapShortcut::Escape));
    assert_eq!(MapShortcut::from_combo("Delete"), Some(MapShortcut::Delete));
    assert_eq!(MapShortcut::from_combo("n"), None);
    assert_eq!(MapShortcut::from_combo("Ctrl+k"), None);
}

#[test]
fn read_only_allows_only_zoom_and_escape() {
    assert!(MapShortcut::ZoomIn.allowed_read_only());
    assert!(MapShortcut::ZoomOut.allowed_read_only());
    assert!(MapShortcut::Escape.allowed_read_only());
    assert!(!MapShortcut::NewNode.allowed_read_only());
    assert!(!MapShortcut::Delete.allowed_read_only());
}
