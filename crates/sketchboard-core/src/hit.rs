//! Hit-testing against scene elements.

use crate::context::Context;
use crate::data::Data;
use crate::element::{Element, ElementId, ElementType};
use kurbo::{Point, Rect, Vec2};

/// Rotate `point` around `center` by `angle` radians (clockwise on screen).
pub fn rotate_point(point: Point, center: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    Point::new(center.x + dx * cos - dy * sin, center.y + dx * sin + dy * cos)
}

/// Rotate a vector by `angle` radians.
pub fn rotate_vec(v: Vec2, angle: f64) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Map a content point into the element's unrotated frame.
pub fn to_element_frame(elem: &Element, point: Point) -> Point {
    if elem.is_rotated() {
        rotate_point(point, elem.center(), -elem.angle_rad())
    } else {
        point
    }
}

/// Check whether a content point lies inside an element.
pub fn element_contains(elem: &Element, point: Point) -> bool {
    let local = to_element_frame(elem, point);
    match elem.kind() {
        ElementType::Circle => {
            let rx = elem.w / 2.0;
            let ry = elem.h / 2.0;
            if rx <= 0.0 || ry <= 0.0 {
                return false;
            }
            let center = elem.center();
            let dx = (local.x - center.x) / rx;
            let dy = (local.y - center.y) / ry;
            dx * dx + dy * dy <= 1.0
        }
        ElementType::Rect
        | ElementType::Text
        | ElementType::Image
        | ElementType::Svg
        | ElementType::Html => {
            let rect = elem.rect();
            local.x >= rect.x0 && local.x <= rect.x1 && local.y >= rect.y0 && local.y <= rect.y1
        }
    }
}

/// Axis-aligned bounds of the (possibly rotated) element box.
pub fn element_bounds(elem: &Element) -> Rect {
    let rect = elem.rect();
    if !elem.is_rotated() {
        return rect;
    }
    let center = elem.center();
    let angle = elem.angle_rad();
    let corners = [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
    .map(|p| rotate_point(p, center, angle));
    let first = Rect::from_points(corners[0], corners[0]);
    corners[1..]
        .iter()
        .fold(first, |acc, p| acc.union_pt(*p))
}

/// Find the front-most element under a screen point.
///
/// Returns the element's index (0 = front-most) and uuid.
pub fn is_point_in_element(point: Point, data: &Data, ctx: &Context) -> Option<(usize, ElementId)> {
    let content = ctx.screen_to_content(point);
    data.elements
        .iter()
        .enumerate()
        .find(|(_, elem)| element_contains(elem, content))
        .map(|(index, elem)| (index, elem.uuid.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{BoardOptions, TransformPatch};
    use crate::element::{CircleDesc, RectDesc, TextDesc};

    fn ctx() -> Context {
        Context::new(BoardOptions::new(500.0, 500.0, 500.0, 500.0))
    }

    #[test]
    fn test_rect_contains() {
        let elem = Element::new(10.0, 10.0, 100.0, 50.0, RectDesc::default());
        assert!(element_contains(&elem, Point::new(10.0, 10.0)));
        assert!(element_contains(&elem, Point::new(60.0, 35.0)));
        assert!(!element_contains(&elem, Point::new(111.0, 35.0)));
    }

    #[test]
    fn test_circle_uses_inscribed_ellipse() {
        let elem = Element::new(0.0, 0.0, 100.0, 100.0, CircleDesc::default());
        assert!(element_contains(&elem, Point::new(50.0, 50.0)));
        assert!(element_contains(&elem, Point::new(50.0, 1.0)));
        // Box corner is outside the circle.
        assert!(!element_contains(&elem, Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_zero_size_circle_never_hit() {
        let elem = Element::new(0.0, 0.0, 0.0, 10.0, CircleDesc::default());
        assert!(!element_contains(&elem, Point::new(0.0, 5.0)));
    }

    #[test]
    fn test_rotated_rect_contains() {
        // 100x10 bar rotated 90 degrees becomes a 10x100 bar around (50, 5).
        let elem = Element::new(0.0, 0.0, 100.0, 10.0, RectDesc::default()).with_angle(90.0);
        assert!(element_contains(&elem, Point::new(50.0, 40.0)));
        assert!(!element_contains(&elem, Point::new(90.0, 5.0)));
    }

    #[test]
    fn test_rotated_bounds() {
        let elem = Element::new(0.0, 0.0, 100.0, 10.0, TextDesc::default()).with_angle(90.0);
        let bounds = element_bounds(&elem);
        assert!((bounds.x0 - 45.0).abs() < 1e-9);
        assert!((bounds.x1 - 55.0).abs() < 1e-9);
        assert!((bounds.y0 + 45.0).abs() < 1e-9);
        assert!((bounds.y1 - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_front_most_element_wins() {
        let mut data = Data::new();
        data.elements.push(Element::new(40.0, 40.0, 20.0, 20.0, RectDesc::default()).with_uuid("front"));
        data.elements.push(Element::new(0.0, 0.0, 100.0, 100.0, RectDesc::default()).with_uuid("back"));

        let hit = is_point_in_element(Point::new(50.0, 50.0), &data, &ctx());
        assert_eq!(hit, Some((0, "front".to_string())));
        let hit = is_point_in_element(Point::new(10.0, 10.0), &data, &ctx());
        assert_eq!(hit, Some((1, "back".to_string())));
        assert_eq!(is_point_in_element(Point::new(200.0, 200.0), &data, &ctx()), None);
    }

    #[test]
    fn test_hit_respects_scale_and_scroll() {
        let mut data = Data::new();
        data.elements.push(Element::new(100.0, 100.0, 10.0, 10.0, RectDesc::default()).with_uuid("a"));
        let mut ctx = ctx();
        ctx.set_transform(
            TransformPatch::default()
                .with_scale(2.0)
                .with_scroll_x(-50.0)
                .with_scroll_y(-50.0),
        );
        // Content (105, 105) is at screen (160, 160).
        assert!(is_point_in_element(Point::new(160.0, 160.0), &data, &ctx).is_some());
        assert!(is_point_in_element(Point::new(105.0, 105.0), &data, &ctx).is_none());
    }
}
