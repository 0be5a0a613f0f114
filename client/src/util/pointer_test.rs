use super::*;

#[test]
fn mouse_position_is_scaled_into_canvas_space() {
    let input = PointerInput::Mouse { x: 400.0, y: 200.0 };
    assert_eq!(canvas_point(&input, Zoom::from_percent(200)), Point::new(200.0, 100.0));
    assert_eq!(canvas_point(&input, Zoom::default()), Point::new(400.0, 200.0));
}

#[test]
fn touch_uses_first_point() {
    let input = PointerInput::Touch(vec![Point::new(50.0, 100.0), Point::new(900.0, 900.0)]);
    assert_eq!(canvas_point(&input, Zoom::from_percent(50)), Point::new(100.0, 200.0));
}

#[test]
fn touch_without_points_is_origin() {
    let input = PointerInput::Touch(Vec::new());
    assert_eq!(canvas_point(&input, Zoom::from_percent(150)), Point::new(0.0, 0.0));
}
