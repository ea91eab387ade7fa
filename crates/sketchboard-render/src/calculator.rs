//! View culling.

use kurbo::Rect;
use sketchboard_core::element::Element;
use sketchboard_core::hit::element_bounds;

/// Whether any part of the element (rotation included) overlaps `visible`.
///
/// Touching edges count as overlap.
pub fn is_element_in_view(elem: &Element, visible: Rect) -> bool {
    let bounds = element_bounds(elem);
    bounds.x0 <= visible.x1 && bounds.x1 >= visible.x0 && bounds.y0 <= visible.y1 && bounds.y1 >= visible.y0
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchboard_core::element::RectDesc;

    #[test]
    fn test_element_in_view() {
        let visible = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inside = Element::new(10.0, 10.0, 20.0, 20.0, RectDesc::default());
        let outside = Element::new(200.0, 10.0, 20.0, 20.0, RectDesc::default());
        let touching = Element::new(100.0, 50.0, 20.0, 20.0, RectDesc::default());
        assert!(is_element_in_view(&inside, visible));
        assert!(!is_element_in_view(&outside, visible));
        assert!(is_element_in_view(&touching, visible));
    }

    #[test]
    fn test_rotation_extends_bounds() {
        let visible = Rect::new(0.0, 0.0, 100.0, 100.0);
        // A tall thin bar just right of the view reaches into it when turned.
        let bar = Element::new(105.0, -50.0, 4.0, 200.0, RectDesc::default());
        assert!(!is_element_in_view(&bar, visible));
        assert!(is_element_in_view(&bar.with_angle(90.0), visible));
    }
}
