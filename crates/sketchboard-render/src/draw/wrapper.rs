use crate::error::RenderResult;
use crate::painter::Painter;
use sketchboard_core::helper::ElementWrapper;
use std::f64::consts::TAU;

const DOT_FILL: &str = "#ffffff";

/// Draw the selection wrapper: a dashed outline plus one dot per resize
/// handle.
///
/// Wrapper sizes are already divided by the board scale, so the outline and
/// dots keep a constant size on screen.
pub fn draw_element_wrapper(painter: &mut dyn Painter, wrapper: &ElementWrapper) -> RenderResult<()> {
    painter.save();
    let result = stroke_wrapper(painter, wrapper);
    painter.restore();
    result
}

fn stroke_wrapper(p: &mut dyn Painter, wrapper: &ElementWrapper) -> RenderResult<()> {
    let angle = wrapper.angle.to_radians();
    if angle != 0.0 {
        p.rotate_about(angle, wrapper.center)?;
    }

    let dash = wrapper.line_width * 4.0;
    p.set_line_dash(&[dash, dash])?;
    p.set_line_width(wrapper.line_width);
    p.set_stroke_style(&wrapper.color);
    p.begin_path();
    p.rect(wrapper.rect);
    p.stroke();

    p.set_line_dash(&[])?;
    for dot in &wrapper.dots {
        // Dot centres are stored rotated; draw them in the unrotated frame.
        let center = dot.position.point_on(wrapper.rect);
        p.begin_path();
        p.arc(center, wrapper.dot_size, 0.0, TAU)?;
        p.set_fill_style(DOT_FILL);
        p.fill();
        p.set_stroke_style(&wrapper.color);
        p.stroke();
    }
    Ok(())
}
