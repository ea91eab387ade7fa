//! Painter trait abstraction.

use crate::error::RenderResult;
use kurbo::{Affine, Point, Rect, Vec2};
use sketchboard_core::element::TextAlign;

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Alphabetic,
    Bottom,
}

impl TextBaseline {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// CSS name of a text alignment.
pub fn text_align_str(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "left",
        TextAlign::Center => "center",
        TextAlign::Right => "right",
    }
}

/// A 2D drawing surface with canvas semantics.
///
/// Colours are CSS colour strings. Angles are radians.
pub trait Painter {
    /// Push the current state (transform, styles) onto the state stack.
    fn save(&mut self);

    /// Pop the last saved state.
    fn restore(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, affine: Affine) -> RenderResult<()>;

    /// Multiply the current transform by `affine`.
    fn transform(&mut self, affine: Affine) -> RenderResult<()>;

    fn translate(&mut self, offset: Vec2) -> RenderResult<()> {
        self.transform(Affine::translate(offset))
    }

    /// Rotate clockwise by `angle` radians around `center`.
    fn rotate_about(&mut self, angle: f64, center: Point) -> RenderResult<()> {
        self.transform(Affine::rotate_about(angle, center))
    }

    fn scale(&mut self, factor: f64) -> RenderResult<()> {
        self.transform(Affine::scale(factor))
    }

    /// Clear a rectangle (in the current transform) to transparent.
    fn clear_rect(&mut self, rect: Rect);

    fn set_fill_style(&mut self, color: &str);
    fn set_stroke_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);

    /// Dash pattern; an empty slice draws solid lines.
    fn set_line_dash(&mut self, segments: &[f64]) -> RenderResult<()>;

    fn set_global_alpha(&mut self, alpha: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) -> RenderResult<()>;
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> RenderResult<()>;
    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64, start: f64, end: f64) -> RenderResult<()>;
    fn rect(&mut self, rect: Rect);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);

    fn fill_rect(&mut self, rect: Rect);
    fn stroke_rect(&mut self, rect: Rect);

    /// CSS font shorthand, e.g. `"bold 12px sans-serif"`.
    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, at: Point) -> RenderResult<()>;

    /// Width of `text` in the current font.
    fn measure_text(&mut self, text: &str) -> RenderResult<f64>;

    /// Draw the image at `url` into `rect` for the element `key`.
    ///
    /// Returns `Ok(false)` while the image is still loading; the backend is
    /// expected to request a repaint once it is available. When `url` changed
    /// for a key (a resized html element, say), the last image loaded for that
    /// key is drawn stretched until the new one is ready.
    fn draw_image(&mut self, key: &str, url: &str, rect: Rect) -> RenderResult<bool>;

    /// Called before a frame is painted.
    fn begin_frame(&mut self) {}

    /// Called after a frame is painted. Backends drop image state for keys
    /// not drawn since [`Painter::begin_frame`].
    fn end_frame(&mut self) {}
}
