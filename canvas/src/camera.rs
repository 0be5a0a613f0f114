//! Canvas-space points and the stepped zoom level.
//!
//! The map canvas does not pan; it only scales. Zoom is kept as an integer
//! percentage so stepping in and out never accumulates float drift, and the
//! DOM layer turns it into a single CSS `scale(..)` transform.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ZOOM_DEFAULT_PERCENT, ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT, ZOOM_STEP_PERCENT};

/// A point in canvas pixel space (or screen space, before conversion).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// Canvas zoom level in percent, clamped to `[50, 200]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zoom {
    percent: u16,
}

impl Default for Zoom {
    fn default() -> Self {
        Self { percent: ZOOM_DEFAULT_PERCENT }
    }
}

impl Zoom {
    /// Build a zoom level, clamping out-of-range input.
    #[must_use]
    pub fn from_percent(percent: u16) -> Self {
        Self { percent: percent.clamp(ZOOM_MIN_PERCENT, ZOOM_MAX_PERCENT) }
    }

    #[must_use]
    pub fn percent(self) -> u16 {
        self.percent
    }

    /// One step closer, saturating at the maximum.
    #[must_use]
    pub fn zoomed_in(self) -> Self {
        Self::from_percent(self.percent.saturating_add(ZOOM_STEP_PERCENT))
    }

    /// One step further out, saturating at the minimum.
    #[must_use]
    pub fn zoomed_out(self) -> Self {
        Self::from_percent(self.percent.saturating_sub(ZOOM_STEP_PERCENT))
    }

    /// Scale factor (1.0 = 100%).
    #[must_use]
    pub fn scale(self) -> f64 {
        f64::from(self.percent) / 100.0
    }

    /// CSS transform applied to the node container.
    #[must_use]
    pub fn css_transform(self) -> String {
        format!("scale({})", self.scale())
    }

    /// Convert a screen-space pointer position into unscaled canvas space.
    #[must_use]
    pub fn screen_to_canvas(self, screen: Point) -> Point {
        let scale = self.scale();
        Point { x: screen.x / scale, y: screen.y / scale }
    }

    /// Label shown in the zoom control, e.g. `"120%"`.
    #[must_use]
    pub fn label(self) -> String {
        format!("{}%", self.percent)
    }
}
