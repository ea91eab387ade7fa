//! A painter that records draw commands instead of producing pixels.

use crate::error::{RenderResult, RendererError};
use crate::painter::{Painter, TextBaseline};
use kurbo::{Affine, Point, Rect, Vec2};
use sketchboard_core::element::TextAlign;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Average glyph width as a fraction of the font size, used by
/// [`RecordingPainter::measure_text`].
const GLYPH_WIDTH_RATIO: f64 = 0.6;

/// One recorded painter call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Save,
    Restore,
    SetTransform(Affine),
    Transform(Affine),
    ClearRect(Rect),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineDash(Vec<f64>),
    GlobalAlpha(f64),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    ArcTo(Point, Point, f64),
    Arc {
        center: Point,
        radius: f64,
        start: f64,
        end: f64,
    },
    Ellipse {
        center: Point,
        radii: Vec2,
        rotation: f64,
        start: f64,
        end: f64,
    },
    Rect(Rect),
    ClosePath,
    Fill,
    Stroke,
    FillRect(Rect),
    StrokeRect(Rect),
    Font(String),
    TextAlign(TextAlign),
    TextBaseline(TextBaseline),
    FillText(String, Point),
    DrawImage(String, Rect),
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::FillText(text, at) => write!(f, "fillText {:?} at ({:.1}, {:.1})", text, at.x, at.y),
            DrawCommand::DrawImage(url, rect) => {
                let shown: String = url.chars().take(48).collect();
                write!(
                    f,
                    "drawImage {} into ({:.1}, {:.1}, {:.1}, {:.1})",
                    shown,
                    rect.x0,
                    rect.y0,
                    rect.width(),
                    rect.height()
                )
            }
            other => write!(f, "{:?}", other),
        }
    }
}

/// Records every call; images are "loaded" once marked with
/// [`RecordingPainter::mark_loaded`].
#[derive(Debug, Default)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    font_size: f64,
    depth: usize,
    loaded: HashSet<String>,
    loaded_all: bool,
    failing: HashSet<String>,
    /// Last loaded url drawn per key.
    shown: HashMap<String, String>,
    used: HashSet<String>,
    requested: HashSet<String>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self {
            font_size: 10.0,
            ..Self::default()
        }
    }

    /// Treat every image as loaded.
    pub fn with_all_images_loaded(mut self) -> Self {
        self.loaded_all = true;
        self
    }

    pub fn mark_loaded(&mut self, url: impl Into<String>) {
        self.loaded.insert(url.into());
    }

    /// Make `draw_image` fail for this url.
    pub fn fail_image(&mut self, url: impl Into<String>) {
        self.failing.insert(url.into());
    }

    /// Distinct urls passed to `draw_image` so far.
    pub fn requested_urls(&self) -> usize {
        self.requested.len()
    }

    /// Keys with a loaded image kept for stretching.
    pub fn shown_keys(&self) -> usize {
        self.shown.len()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Unbalanced `save` calls outstanding.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Count commands matching a predicate.
    pub fn count(&self, pred: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

/// Pixel size from a CSS font shorthand such as `"bold 14px serif"`.
fn parse_font_size(font: &str) -> Option<f64> {
    font.split_whitespace()
        .find_map(|token| token.strip_suffix("px"))
        .and_then(|size| size.parse().ok())
}

impl Painter for RecordingPainter {
    fn save(&mut self) {
        self.depth += 1;
        self.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.push(DrawCommand::Restore);
    }

    fn set_transform(&mut self, affine: Affine) -> RenderResult<()> {
        self.push(DrawCommand::SetTransform(affine));
        Ok(())
    }

    fn transform(&mut self, affine: Affine) -> RenderResult<()> {
        self.push(DrawCommand::Transform(affine));
        Ok(())
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::ClearRect(rect));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.push(DrawCommand::FillStyle(color.to_string()));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.push(DrawCommand::StrokeStyle(color.to_string()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.push(DrawCommand::LineWidth(width));
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> RenderResult<()> {
        self.push(DrawCommand::LineDash(segments.to_vec()));
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.push(DrawCommand::GlobalAlpha(alpha));
    }

    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.push(DrawCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.push(DrawCommand::LineTo(p));
    }

    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) -> RenderResult<()> {
        self.push(DrawCommand::ArcTo(p1, p2, radius));
        Ok(())
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> RenderResult<()> {
        if radius < 0.0 {
            return Err(RendererError::DrawFailed(format!("negative arc radius {}", radius)));
        }
        self.push(DrawCommand::Arc {
            center,
            radius,
            start,
            end,
        });
        Ok(())
    }

    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64, start: f64, end: f64) -> RenderResult<()> {
        if radii.x < 0.0 || radii.y < 0.0 {
            return Err(RendererError::DrawFailed(format!("negative ellipse radii {:?}", radii)));
        }
        self.push(DrawCommand::Ellipse {
            center,
            radii,
            rotation,
            start,
            end,
        });
        Ok(())
    }

    fn rect(&mut self, rect: Rect) {
        self.push(DrawCommand::Rect(rect));
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::FillRect(rect));
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.push(DrawCommand::StrokeRect(rect));
    }

    fn set_font(&mut self, font: &str) {
        if let Some(size) = parse_font_size(font) {
            self.font_size = size;
        }
        self.push(DrawCommand::Font(font.to_string()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.push(DrawCommand::TextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.push(DrawCommand::TextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, at: Point) -> RenderResult<()> {
        self.push(DrawCommand::FillText(text.to_string(), at));
        Ok(())
    }

    fn measure_text(&mut self, text: &str) -> RenderResult<f64> {
        Ok(text.chars().count() as f64 * self.font_size * GLYPH_WIDTH_RATIO)
    }

    fn draw_image(&mut self, key: &str, url: &str, rect: Rect) -> RenderResult<bool> {
        self.used.insert(key.to_string());
        self.requested.insert(url.to_string());
        if self.failing.contains(url) {
            return Err(RendererError::Resource(format!("failed to load {}", url)));
        }
        if self.loaded_all || self.loaded.contains(url) {
            self.shown.insert(key.to_string(), url.to_string());
            self.push(DrawCommand::DrawImage(url.to_string(), rect));
            return Ok(true);
        }
        match self.shown.get(key).cloned() {
            Some(stale) => {
                self.push(DrawCommand::DrawImage(stale, rect));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn begin_frame(&mut self) {
        self.used.clear();
    }

    fn end_frame(&mut self) {
        let used = &self.used;
        self.shown.retain(|key, _| used.contains(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font_size() {
        assert_eq!(parse_font_size("bold 14px serif"), Some(14.0));
        assert_eq!(parse_font_size("12.5px sans-serif"), Some(12.5));
        assert_eq!(parse_font_size("serif"), None);
    }

    #[test]
    fn test_measure_uses_font_size() {
        let mut painter = RecordingPainter::new();
        painter.set_font("20px sans-serif");
        let width = painter.measure_text("abcd").unwrap();
        assert!((width - 4.0 * 20.0 * GLYPH_WIDTH_RATIO).abs() < 1e-9);
    }

    #[test]
    fn test_images_pending_until_loaded() {
        let mut painter = RecordingPainter::new();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        assert!(!painter.draw_image("a", "a.png", rect).unwrap());
        painter.mark_loaded("a.png");
        assert!(painter.draw_image("a", "a.png", rect).unwrap());
        painter.fail_image("b.png");
        assert!(painter.draw_image("b", "b.png", rect).is_err());
        assert_eq!(painter.count(|c| matches!(c, DrawCommand::DrawImage(..))), 1);
    }

    #[test]
    fn test_unused_keys_dropped_at_frame_end() {
        let mut painter = RecordingPainter::new().with_all_images_loaded();
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        painter.begin_frame();
        painter.draw_image("a", "a.png", rect).unwrap();
        painter.draw_image("b", "b.png", rect).unwrap();
        painter.end_frame();
        assert_eq!(painter.shown_keys(), 2);

        painter.begin_frame();
        painter.draw_image("a", "a.png", rect).unwrap();
        painter.end_frame();
        assert_eq!(painter.shown_keys(), 1);
    }

    #[test]
    fn test_save_restore_depth() {
        let mut painter = RecordingPainter::new();
        painter.save();
        painter.save();
        painter.restore();
        assert_eq!(painter.depth(), 1);
        painter.restore();
        painter.restore();
        assert_eq!(painter.depth(), 0);
    }
}
