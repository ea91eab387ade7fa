use super::{DrawStatus, rounded_rect_path, with_rotation};
use crate::error::RenderResult;
use crate::painter::Painter;
use sketchboard_core::element::{Element, RectDesc};

/// Fill the element box, rounding corners by `border_radius`, then stroke the
/// border if it has a width.
pub fn draw_rect(painter: &mut dyn Painter, elem: &Element, desc: &RectDesc) -> RenderResult<DrawStatus> {
    with_rotation(painter, elem, |p| {
        let rect = elem.rect();
        rounded_rect_path(p, rect, desc.border_radius)?;
        p.set_fill_style(&desc.color);
        p.fill();
        if desc.border_width > 0.0 {
            // Keep the stroke inside the element box.
            let inset = desc.border_width / 2.0;
            rounded_rect_path(p, rect.inset(-inset), (desc.border_radius - inset).max(0.0))?;
            p.set_line_width(desc.border_width);
            p.set_stroke_style(&desc.border_color);
            p.stroke();
        }
        Ok(DrawStatus::Drawn)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingPainter};
    use kurbo::Rect;

    #[test]
    fn test_plain_rect() {
        let desc = RectDesc::default();
        let elem = Element::new(10.0, 20.0, 30.0, 40.0, desc.clone());
        let mut painter = RecordingPainter::new();
        let status = draw_rect(&mut painter, &elem, &desc).unwrap();
        assert_eq!(status, DrawStatus::Drawn);
        assert!(painter.commands().contains(&DrawCommand::Rect(Rect::new(10.0, 20.0, 40.0, 60.0))));
        assert_eq!(painter.count(|c| *c == DrawCommand::Fill), 1);
        assert_eq!(painter.count(|c| *c == DrawCommand::Stroke), 0);
    }

    #[test]
    fn test_border_is_inset() {
        let desc = RectDesc {
            border_width: 4.0,
            border_color: "#ff0000".into(),
            ..RectDesc::default()
        };
        let elem = Element::new(0.0, 0.0, 100.0, 50.0, desc.clone());
        let mut painter = RecordingPainter::new();
        draw_rect(&mut painter, &elem, &desc).unwrap();
        assert!(painter.commands().contains(&DrawCommand::Rect(Rect::new(2.0, 2.0, 98.0, 48.0))));
        assert!(painter.commands().contains(&DrawCommand::StrokeStyle("#ff0000".into())));
        assert!(painter.commands().contains(&DrawCommand::LineWidth(4.0)));
        assert_eq!(painter.count(|c| *c == DrawCommand::Stroke), 1);
    }
}
