//! Input model: pointer normalization, the per-node drag state machine, and
//! keyboard shortcut mapping.
//!
//! `Draggable` is the gesture tracked between pointer-down and pointer-up on a
//! single node. It never touches the document itself; it reports
//! [`DragEvent`]s and the owner decides what to mutate or persist. Pointer
//! positions handed to it must already be in canvas space (see
//! [`crate::camera::Zoom::screen_to_canvas`]).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;

// =============================================================================
// Pointer
// =============================================================================

/// Where on a node a pointer event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The node's drag handle; pressing here starts a drag.
    Handle,
    /// Anywhere else on the node; clicking here selects it.
    Body,
}

/// A raw pointer sample from either input device.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput {
    Mouse { x: f64, y: f64 },
    /// Active touch points in browser order. May be empty on `touchend`.
    Touch(Vec<Point>),
}

impl PointerInput {
    /// Collapse to a single position.
    #[must_use]
    pub fn position(&self) -> Point {
        match self {
            Self::Mouse { x, y } => normalize_mouse(*x, *y),
            Self::Touch(touches) => normalize_touch(touches),
        }
    }
}

#[must_use]
pub fn normalize_mouse(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// First touch point, or the origin when there is none.
#[must_use]
pub fn normalize_touch(touches: &[Point]) -> Point {
    touches.first().copied().unwrap_or_default()
}

// =============================================================================
// Drag state machine
// =============================================================================

/// Drag gesture state for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer is down on the handle.
    Dragging {
        /// Pointer minus node top-left at pointer-down.
        offset: Point,
        /// Last reported top-left; `None` until the first move.
        live: Option<Point>,
    },
}

/// What a pointer event meant for the node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    /// Nothing to do.
    None,
    /// Entered dragging. The host attaches document listeners and suppresses
    /// the browser's native drag/selection.
    Started,
    /// Live top-left during a drag. Local only.
    Moved(Point),
    /// Drag finished with a final top-left to persist.
    Ended(Point),
    /// Pointer released without ever moving. Nothing to persist.
    Released,
    /// Plain click: select the node.
    Select,
}

impl DragEvent {
    /// Whether the host should detach its document-level listeners.
    #[must_use]
    pub fn leaves_drag(self) -> bool {
        matches!(self, Self::Ended(_) | Self::Released)
    }
}

/// Per-node drag tracker.
#[derive(Debug, Clone, Default)]
pub struct Draggable {
    state: DragState,
    disabled: bool,
    suppress_click: bool,
}

impl Draggable {
    #[must_use]
    pub fn new(disabled: bool) -> Self {
        Self { disabled, ..Self::default() }
    }

    #[must_use]
    pub fn state(&self) -> DragState {
        self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Live top-left while a drag has moved, `None` otherwise.
    #[must_use]
    pub fn live_position(&self) -> Option<Point> {
        match self.state {
            DragState::Dragging { live, .. } => live,
            DragState::Idle => None,
        }
    }

    /// Toggle read-only mode. Disabling mid-drag abandons the gesture: it
    /// returns [`DragEvent::Released`] so the host drops the live position
    /// and detaches its listeners, and nothing is persisted.
    pub fn set_disabled(&mut self, disabled: bool) -> DragEvent {
        self.disabled = disabled;
        if !disabled || !self.is_dragging() {
            return DragEvent::None;
        }
        self.state = DragState::Idle;
        self.suppress_click = false;
        DragEvent::Released
    }

    /// Pointer pressed at `pointer` on a node whose top-left is `node_top_left`.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point, node_top_left: Point) -> DragEvent {
        if self.disabled || target != PointerTarget::Handle || self.is_dragging() {
            return DragEvent::None;
        }
        self.suppress_click = false;
        self.state = DragState::Dragging {
            offset: Point::new(pointer.x - node_top_left.x, pointer.y - node_top_left.y),
            live: None,
        };
        DragEvent::Started
    }

    pub fn pointer_move(&mut self, pointer: Point) -> DragEvent {
        let DragState::Dragging { offset, live } = &mut self.state else {
            return DragEvent::None;
        };
        let top_left = Point::new(pointer.x - offset.x, pointer.y - offset.y);
        *live = Some(top_left);
        DragEvent::Moved(top_left)
    }

    pub fn pointer_up(&mut self) -> DragEvent {
        let DragState::Dragging { live, .. } = self.state else {
            return DragEvent::None;
        };
        self.state = DragState::Idle;
        match live {
            Some(position) => {
                self.suppress_click = true;
                DragEvent::Ended(position)
            }
            None => DragEvent::Released,
        }
    }

    /// Browser `click` on the node. Swallowed right after a real drag and on
    /// the handle itself; everything else selects.
    pub fn click(&mut self, target: PointerTarget) -> DragEvent {
        if std::mem::take(&mut self.suppress_click) {
            return DragEvent::None;
        }
        if self.is_dragging() || (!self.disabled && target == PointerTarget::Handle) {
            return DragEvent::None;
        }
        DragEvent::Select
    }
}

// =============================================================================
// Keyboard
// =============================================================================

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

/// Build the combo string for a keydown, e.g. `"Ctrl+n"` or `"Escape"`.
///
/// On macOS the Command key plays the role of Ctrl, so a single binding
/// covers both platforms. A bare space is named `"Space"`.
#[must_use]
pub fn shortcut_combo(key: &str, mods: Modifiers, is_mac: bool) -> String {
    let primary = if is_mac { mods.meta } else { mods.ctrl };
    let mut combo = String::new();
    if primary {
        combo.push_str("Ctrl+");
    }
    if mods.shift {
        combo.push_str("Shift+");
    }
    if mods.alt {
        combo.push_str("Alt+");
    }
    combo.push_str(if key == " " { "Space" } else { key });
    combo
}

/// Shortcuts understood by the canvas page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapShortcut {
    NewNode,
    ZoomIn,
    ZoomOut,
    Escape,
    Delete,
}

impl MapShortcut {
    /// Map a combo string to a shortcut.
    #[must_use]
    pub fn from_combo(combo: &str) -> Option<Self> {
        match combo {
            "Ctrl+n" => Some(Self::NewNode),
            // `+` needs Shift on most layouts
            "+" | "Shift++" | "=" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            "Escape" => Some(Self::Escape),
            "Delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Whether this shortcut may run in read-only mode.
    #[must_use]
    pub fn allowed_read_only(self) -> bool {
        matches!(self, Self::ZoomIn | Self::ZoomOut | Self::Escape)
    }
}
