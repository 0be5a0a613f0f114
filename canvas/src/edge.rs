//! Edge geometry: cubic bezier curves between two node anchors.
//!
//! Nodes are positioned by their top-left corner. An edge runs between the
//! approximate visual centers of its two nodes, bending horizontally with a
//! strength proportional to their distance and capped at [`CURVE_MAX`] so long
//! edges don't overshoot.
//!
//! Everything here is a pure function of the two endpoint positions.

#[cfg(test)]
#[path = "edge_test.rs"]
mod edge_test;

use crate::camera::Point;
use crate::consts::{ARROW_OFFSET, CURVE_FACTOR, CURVE_MAX, NODE_HALF_HEIGHT, NODE_HALF_WIDTH};

/// Visual center of a node whose top-left corner is at `top_left`.
#[must_use]
pub fn node_anchor(top_left: Point) -> Point {
    Point::new(top_left.x + NODE_HALF_WIDTH, top_left.y + NODE_HALF_HEIGHT)
}

/// Control-point offset for two anchors `distance` apart.
#[must_use]
pub fn curve_strength(distance: f64) -> f64 {
    (distance * CURVE_FACTOR).min(CURVE_MAX)
}

/// Cubic bezier between two node anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    pub curve_strength: f64,
}

/// Arrowhead placement at the destination end of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrowhead {
    /// Anchor point, pulled back from the destination so it clears the node.
    pub at: Point,
    /// Rotation in degrees (0 = pointing right, clockwise positive).
    pub angle_deg: f64,
}

impl EdgeGeometry {
    /// Build the edge between two nodes given their top-left positions.
    #[must_use]
    pub fn between(from_top_left: Point, to_top_left: Point) -> Self {
        Self::between_anchors(node_anchor(from_top_left), node_anchor(to_top_left))
    }

    /// Build the edge between two already-centered anchor points.
    ///
    /// Control points sit on the horizontal through each endpoint, offset
    /// toward the other endpoint. Swapping `start` and `end` yields the same
    /// curve traversed backwards.
    #[must_use]
    pub fn between_anchors(start: Point, end: Point) -> Self {
        let strength = curve_strength(start.distance_to(end));
        let dir = horizontal_direction(start, end);
        Self {
            start,
            control1: Point::new(start.x + dir * strength, start.y),
            control2: Point::new(end.x - dir * strength, end.y),
            end,
            curve_strength: strength,
        }
    }

    /// The same curve traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            control1: self.control2,
            control2: self.control1,
            end: self.start,
            curve_strength: self.curve_strength,
        }
    }

    /// SVG path data: `M x0 y0 C x1 y1, x2 y2, x3 y3`.
    #[must_use]
    pub fn path_data(&self) -> String {
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y,
        )
    }

    /// Arrowhead at the destination, aligned with the curve's final tangent.
    #[must_use]
    pub fn arrowhead(&self) -> Arrowhead {
        let angle = (self.end.y - self.control2.y).atan2(self.end.x - self.control2.x);
        Arrowhead {
            at: Point::new(
                self.end.x - ARROW_OFFSET * angle.cos(),
                self.end.y - ARROW_OFFSET * angle.sin(),
            ),
            angle_deg: angle.to_degrees(),
        }
    }
}

/// +1 when the curve should bend rightward out of `start`, -1 for leftward.
///
/// Antisymmetric in its arguments so the curve shape doesn't depend on which
/// end is "from". Vertically aligned anchors fall back to the sign of dy.
fn horizontal_direction(start: Point, end: Point) -> f64 {
    let dx = end.x - start.x;
    if dx > 0.0 {
        1.0
    } else if dx < 0.0 {
        -1.0
    } else if end.y < start.y {
        -1.0
    } else {
        1.0
    }
}
