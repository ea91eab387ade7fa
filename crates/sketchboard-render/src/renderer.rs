//! Frame renderer.

use crate::draw::{draw_element_list, draw_element_wrapper};
use crate::error::RenderResult;
use crate::painter::Painter;
use kurbo::{Affine, Rect};
use serde::Serialize;
use sketchboard_core::context::Context;
use sketchboard_core::data::Data;
use sketchboard_core::editor::DrawFrame;
use sketchboard_core::helper::HelperConfig;

/// Counts from one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Elements painted.
    pub drawn: usize,
    /// Elements skipped because they were outside the view.
    pub culled: usize,
    /// Elements whose draw failed.
    pub failed: usize,
    /// Elements waiting for an image to load.
    pub pending: usize,
}

impl RenderStats {
    /// Whether every visible element made it onto the surface.
    pub fn is_complete(&self) -> bool {
        self.pending == 0 && self.failed == 0
    }
}

/// Paints the scene onto a content-sized surface.
///
/// The surface covers the whole content area at device resolution; placing
/// it on screen for the current scale and scroll is the board's job.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    background: Option<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill the content area with a colour before drawing elements.
    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn background(&self) -> Option<&str> {
        self.background.as_deref()
    }

    /// Clear the surface and paint every visible element plus the selection
    /// wrapper.
    pub fn render(
        &self,
        painter: &mut dyn Painter,
        data: &Data,
        helper: &HelperConfig,
        ctx: &Context,
        visible: Option<Rect>,
    ) -> RenderResult<RenderStats> {
        let opts = ctx.options();
        let dpr = opts.device_pixel_ratio;
        let device = Rect::new(0.0, 0.0, opts.context_width * dpr, opts.context_height * dpr);

        painter.set_transform(Affine::IDENTITY)?;
        painter.clear_rect(device);
        if let Some(color) = &self.background {
            painter.set_fill_style(color);
            painter.fill_rect(device);
        }

        painter.set_transform(Affine::scale(dpr))?;
        painter.begin_frame();
        let stats = draw_element_list(painter, &data.elements, visible);
        painter.end_frame();
        if let Some(wrapper) = &helper.selected_element_wrapper {
            draw_element_wrapper(painter, wrapper)?;
        }

        log::debug!(
            "Rendered frame: {} drawn, {} culled, {} pending, {} failed",
            stats.drawn,
            stats.culled,
            stats.pending,
            stats.failed
        );
        Ok(stats)
    }

    /// Render a frame produced by the editor.
    pub fn render_frame(&self, painter: &mut dyn Painter, frame: &DrawFrame<'_>) -> RenderResult<RenderStats> {
        self.render(painter, frame.data, frame.helper, frame.context, frame.visible)
    }
}
