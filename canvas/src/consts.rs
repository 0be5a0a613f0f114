//! Shared numeric constants for the canvas crate.

// ── Node box ────────────────────────────────────────────────────

/// Half of the rendered node width (nodes are 200px wide).
pub const NODE_HALF_WIDTH: f64 = 100.0;

/// Approximate half of the rendered node height.
pub const NODE_HALF_HEIGHT: f64 = 96.5;

/// Top-left position given to nodes created without one.
pub const DEFAULT_NODE_X: f64 = 300.0;
/// See [`DEFAULT_NODE_X`].
pub const DEFAULT_NODE_Y: f64 = 300.0;

// ── Edges ───────────────────────────────────────────────────────

/// Fraction of the endpoint distance used as the control-point offset.
pub const CURVE_FACTOR: f64 = 0.4;

/// Upper bound on the control-point offset, in canvas pixels.
pub const CURVE_MAX: f64 = 200.0;

/// Distance the arrowhead anchor sits back from the destination center.
pub const ARROW_OFFSET: f64 = 15.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest zoom level, in percent.
pub const ZOOM_MIN_PERCENT: u16 = 50;

/// Largest zoom level, in percent.
pub const ZOOM_MAX_PERCENT: u16 = 200;

/// Zoom increment per step, in percent.
pub const ZOOM_STEP_PERCENT: u16 = 10;

/// Zoom level a freshly opened canvas starts at.
pub const ZOOM_DEFAULT_PERCENT: u16 = 100;
