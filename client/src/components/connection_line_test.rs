use canvas::camera::Point;

use super::*;

#[test]
fn arrowhead_is_translated_then_rotated() {
    let head = Arrowhead { at: Point::new(120.5, 40.0), angle_deg: 90.0 };
    assert_eq!(arrowhead_transform(head), "translate(120.5 40) rotate(90)");
}
