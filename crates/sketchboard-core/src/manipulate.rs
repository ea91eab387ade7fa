//! Drag and resize math for selected elements.

use crate::data::Data;
use crate::error::{CoreError, CoreResult};
use crate::helper::DotPosition;
use crate::hit::rotate_vec;
use kurbo::{Point, Vec2};

/// Smallest width/height an element can be resized to, in content pixels.
pub const MIN_ELEMENT_SIZE: f64 = 1.0;

/// Move an element by the screen-space distance between two pointer points.
pub fn drag_element(
    data: &mut Data,
    uuid: &str,
    point: Point,
    prev_point: Point,
    scale: f64,
) -> CoreResult<()> {
    let elem = data
        .get_mut(uuid)
        .ok_or_else(|| CoreError::ElementNotFound(uuid.to_string()))?;
    let delta = (point - prev_point) / scale;
    elem.x += delta.x;
    elem.y += delta.y;
    Ok(())
}

/// Resize an element by dragging one of its wrapper dots.
///
/// The edge opposite to the dragged dot stays fixed. For rotated elements the
/// pointer delta is projected onto the element's own axes.
pub fn transform_element(
    data: &mut Data,
    uuid: &str,
    dot: DotPosition,
    point: Point,
    prev_point: Point,
    scale: f64,
) -> CoreResult<()> {
    let elem = data
        .get_mut(uuid)
        .ok_or_else(|| CoreError::ElementNotFound(uuid.to_string()))?;

    let angle = elem.angle_rad();
    let delta = rotate_vec((point - prev_point) / scale, -angle);

    // Edges of the box in the element frame, relative to its centre.
    let mut left = -elem.w / 2.0;
    let mut right = elem.w / 2.0;
    let mut top = -elem.h / 2.0;
    let mut bottom = elem.h / 2.0;

    let (fx, fy) = dot.factors();
    if fx < 0.0 {
        left = (left + delta.x).min(right - MIN_ELEMENT_SIZE);
    } else if fx > 0.0 {
        right = (right + delta.x).max(left + MIN_ELEMENT_SIZE);
    }
    if fy < 0.0 {
        top = (top + delta.y).min(bottom - MIN_ELEMENT_SIZE);
    } else if fy > 0.0 {
        bottom = (bottom + delta.y).max(top + MIN_ELEMENT_SIZE);
    }

    let shift = rotate_vec(Vec2::new((left + right) / 2.0, (top + bottom) / 2.0), angle);
    let center = elem.center() + shift;
    elem.w = right - left;
    elem.h = bottom - top;
    elem.x = center.x - elem.w / 2.0;
    elem.y = center.y - elem.h / 2.0;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{Element, RectDesc};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn scene() -> Data {
        let mut data = Data::new();
        data.elements.push(Element::new(10.0, 20.0, 100.0, 50.0, RectDesc::default()).with_uuid("r"));
        data
    }

    #[test]
    fn test_drag_divides_by_scale() {
        let mut data = scene();
        drag_element(&mut data, "r", Point::new(30.0, 40.0), Point::new(10.0, 10.0), 2.0).unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.x, 20.0));
        assert!(approx(elem.y, 35.0));
    }

    #[test]
    fn test_drag_unknown_element() {
        let mut data = scene();
        let result = drag_element(&mut data, "nope", Point::ZERO, Point::ZERO, 1.0);
        assert!(matches!(result, Err(CoreError::ElementNotFound(_))));
    }

    #[test]
    fn test_resize_bottom_right() {
        let mut data = scene();
        transform_element(
            &mut data,
            "r",
            DotPosition::BottomRight,
            Point::new(20.0, 10.0),
            Point::ZERO,
            1.0,
        )
        .unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.x, 10.0));
        assert!(approx(elem.y, 20.0));
        assert!(approx(elem.w, 120.0));
        assert!(approx(elem.h, 60.0));
    }

    #[test]
    fn test_resize_top_left_moves_origin() {
        let mut data = scene();
        transform_element(
            &mut data,
            "r",
            DotPosition::TopLeft,
            Point::new(10.0, 10.0),
            Point::ZERO,
            1.0,
        )
        .unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.x, 20.0));
        assert!(approx(elem.y, 30.0));
        assert!(approx(elem.w, 90.0));
        assert!(approx(elem.h, 40.0));
    }

    #[test]
    fn test_side_dot_changes_one_dimension() {
        let mut data = scene();
        transform_element(&mut data, "r", DotPosition::Top, Point::new(50.0, -10.0), Point::ZERO, 2.0).unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.x, 10.0));
        assert!(approx(elem.w, 100.0));
        assert!(approx(elem.y, 15.0));
        assert!(approx(elem.h, 55.0));
    }

    #[test]
    fn test_resize_clamps_to_min_size() {
        let mut data = scene();
        transform_element(&mut data, "r", DotPosition::Left, Point::new(500.0, 0.0), Point::ZERO, 1.0).unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.w, MIN_ELEMENT_SIZE));
        // Right edge stays at 110.
        assert!(approx(elem.x + elem.w, 110.0));
    }

    #[test]
    fn test_resize_rotated_keeps_opposite_edge() {
        let mut data = Data::new();
        data.elements.push(
            Element::new(0.0, 0.0, 100.0, 20.0, RectDesc::default())
                .with_uuid("r")
                .with_angle(90.0),
        );
        // Rotated 90 degrees the element's "right" edge faces down on screen.
        transform_element(&mut data, "r", DotPosition::Right, Point::new(0.0, 10.0), Point::ZERO, 1.0).unwrap();
        let elem = data.get("r").unwrap();
        assert!(approx(elem.w, 110.0));
        assert!(approx(elem.h, 20.0));
        // The left edge (top on screen) did not move: centre shifted by 5 along y.
        let center = elem.center();
        assert!(approx(center.x, 50.0));
        assert!(approx(center.y, 15.0));
    }
}
