//! Per-type draw functions.
//!
//! All drawing happens in content coordinates; the caller sets up the device
//! transform. Each element draws inside its own `save`/`restore` pair with its
//! rotation applied around its centre.

mod circle;
mod image;
mod rect;
mod text;
mod wrapper;

pub use circle::draw_circle;
pub use image::{draw_html, draw_image, draw_svg};
pub use rect::draw_rect;
pub use text::{draw_text, wrap_text};
pub use wrapper::draw_element_wrapper;

use crate::calculator::is_element_in_view;
use crate::error::RenderResult;
use crate::painter::Painter;
use crate::renderer::RenderStats;
use kurbo::{Point, Rect};
use sketchboard_core::element::{Element, ElementDetail};

/// Result of drawing one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    Drawn,
    /// The element's image is still loading; nothing was painted.
    Pending,
    /// Drawing failed; the error was logged.
    Failed,
}

/// Run `f` with the element rotation applied, restoring the painter state
/// afterwards even when `f` fails.
pub(crate) fn with_rotation<F>(painter: &mut dyn Painter, elem: &Element, f: F) -> RenderResult<DrawStatus>
where
    F: FnOnce(&mut dyn Painter) -> RenderResult<DrawStatus>,
{
    painter.save();
    let result = if elem.is_rotated() {
        painter
            .rotate_about(elem.angle_rad(), elem.center())
            .and_then(|_| f(&mut *painter))
    } else {
        f(&mut *painter)
    };
    painter.restore();
    result
}

/// Trace a rectangle with rounded corners. The radius is clamped to half the
/// shorter side.
pub(crate) fn rounded_rect_path(painter: &mut dyn Painter, rect: Rect, radius: f64) -> RenderResult<()> {
    let r = radius.max(0.0).min(rect.width().min(rect.height()) / 2.0);
    painter.begin_path();
    if r <= 0.0 {
        painter.rect(rect);
        return Ok(());
    }
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    painter.move_to(Point::new(x0 + r, y0));
    painter.arc_to(Point::new(x1, y0), Point::new(x1, y1), r)?;
    painter.arc_to(Point::new(x1, y1), Point::new(x0, y1), r)?;
    painter.arc_to(Point::new(x0, y1), Point::new(x0, y0), r)?;
    painter.arc_to(Point::new(x0, y0), Point::new(x1, y0), r)?;
    painter.close_path();
    Ok(())
}

/// Draw one element, logging instead of propagating failures.
pub fn draw_element(painter: &mut dyn Painter, elem: &Element) -> DrawStatus {
    let result = match &elem.detail {
        ElementDetail::Rect(desc) => draw_rect(painter, elem, desc),
        ElementDetail::Circle(desc) => draw_circle(painter, elem, desc),
        ElementDetail::Text(desc) => draw_text(painter, elem, desc),
        ElementDetail::Image(desc) => draw_image(painter, elem, desc),
        ElementDetail::Svg(desc) => draw_svg(painter, elem, desc),
        ElementDetail::Html(desc) => draw_html(painter, elem, desc),
    };
    match result {
        Ok(status) => status,
        Err(e) => {
            log::error!("Failed to draw {} element {}: {}", elem.kind().as_str(), elem.uuid, e);
            DrawStatus::Failed
        }
    }
}

/// Draw elements back to front, skipping those outside `visible`. With no
/// visible area every element is culled.
///
/// `elements[0]` is the front-most element, so it is painted last.
pub fn draw_element_list(painter: &mut dyn Painter, elements: &[Element], visible: Option<Rect>) -> RenderStats {
    let mut stats = RenderStats::default();
    for elem in elements.iter().rev() {
        if !visible.is_some_and(|view| is_element_in_view(elem, view)) {
            stats.culled += 1;
            continue;
        }
        match draw_element(painter, elem) {
            DrawStatus::Drawn => stats.drawn += 1,
            DrawStatus::Pending => stats.pending += 1,
            DrawStatus::Failed => stats.failed += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingPainter};
    use sketchboard_core::element::{CircleDesc, ImageDesc, RectDesc};

    fn fill_styles(painter: &RecordingPainter) -> Vec<String> {
        painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillStyle(color) => Some(color.clone()),
                _ => None,
            })
            .collect()
    }

    fn rect_with_color(x: f64, color: &str) -> Element {
        Element::new(
            x,
            0.0,
            10.0,
            10.0,
            RectDesc {
                color: color.into(),
                ..RectDesc::default()
            },
        )
    }

    #[test]
    fn test_list_paints_back_to_front() {
        let elements = vec![rect_with_color(0.0, "#front"), rect_with_color(5.0, "#back")];
        let mut painter = RecordingPainter::new();
        let stats = draw_element_list(&mut painter, &elements, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(stats.drawn, 2);
        assert_eq!(fill_styles(&painter), vec!["#back".to_string(), "#front".to_string()]);
        assert_eq!(painter.depth(), 0);
    }

    #[test]
    fn test_list_culls_outside_view() {
        let elements = vec![rect_with_color(0.0, "#a"), rect_with_color(500.0, "#b")];
        let mut painter = RecordingPainter::new();
        let stats = draw_element_list(&mut painter, &elements, Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 1);
        assert_eq!(fill_styles(&painter), vec!["#a".to_string()]);
    }

    #[test]
    fn test_failure_does_not_stop_the_list() {
        let broken = Element::new(0.0, 0.0, 10.0, 10.0, ImageDesc { src: "broken.png".into() });
        let circle = Element::new(20.0, 0.0, 10.0, 10.0, CircleDesc::default());
        let pending = Element::new(40.0, 0.0, 10.0, 10.0, ImageDesc { src: "slow.png".into() });
        let mut painter = RecordingPainter::new();
        painter.fail_image("broken.png");
        let visible = Some(Rect::new(0.0, 0.0, 100.0, 100.0));
        let stats = draw_element_list(&mut painter, &[broken, circle, pending], visible);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.pending, 1);
        assert_eq!(painter.depth(), 0);
    }

    #[test]
    fn test_rotation_wraps_draw() {
        let elem = rect_with_color(0.0, "#a").with_angle(90.0);
        let mut painter = RecordingPainter::new();
        assert_eq!(draw_element(&mut painter, &elem), DrawStatus::Drawn);
        let commands = painter.commands();
        assert_eq!(commands.first(), Some(&DrawCommand::Save));
        assert!(matches!(commands.get(1), Some(DrawCommand::Transform(_))));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
    }

    #[test]
    fn test_rounded_rect_clamps_radius() {
        let mut painter = RecordingPainter::new();
        rounded_rect_path(&mut painter, Rect::new(0.0, 0.0, 20.0, 10.0), 50.0).unwrap();
        let radii: Vec<f64> = painter
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::ArcTo(_, _, r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(radii.len(), 4);
        assert!(radii.iter().all(|r| (r - 5.0).abs() < 1e-9));
    }

    #[test]
    fn test_square_corners_use_plain_rect() {
        let mut painter = RecordingPainter::new();
        rounded_rect_path(&mut painter, Rect::new(0.0, 0.0, 20.0, 10.0), 0.0).unwrap();
        assert_eq!(painter.count(|c| matches!(c, DrawCommand::Rect(_))), 1);
        assert_eq!(painter.count(|c| matches!(c, DrawCommand::ArcTo(..))), 0);
    }
}
