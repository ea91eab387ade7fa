use super::{DrawStatus, with_rotation};
use crate::error::RenderResult;
use crate::painter::Painter;
use kurbo::Vec2;
use sketchboard_core::element::{CircleDesc, Element};
use std::f64::consts::TAU;

/// Fill the ellipse inscribed in the element box, then stroke its border
/// inside that ellipse.
pub fn draw_circle(painter: &mut dyn Painter, elem: &Element, desc: &CircleDesc) -> RenderResult<DrawStatus> {
    with_rotation(painter, elem, |p| {
        let center = elem.center();
        let radii = Vec2::new(elem.w / 2.0, elem.h / 2.0);
        p.begin_path();
        p.ellipse(center, radii, 0.0, 0.0, TAU)?;
        p.set_fill_style(&desc.color);
        p.fill();
        if desc.border_width > 0.0 {
            let inset = desc.border_width / 2.0;
            let inner = Vec2::new((radii.x - inset).max(0.0), (radii.y - inset).max(0.0));
            p.begin_path();
            p.ellipse(center, inner, 0.0, 0.0, TAU)?;
            p.set_line_width(desc.border_width);
            p.set_stroke_style(&desc.border_color);
            p.stroke();
        }
        Ok(DrawStatus::Drawn)
    })
}
