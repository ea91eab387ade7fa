//! Viewport: the platform independent half of the board.
//!
//! Owns the [`Context`] and derives where the content sits on screen for the
//! current scale and scroll.

use crate::context::{BoardOptions, Context, Transform, TransformPatch};
use crate::error::CoreResult;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// Distance from each board edge to the matching content edge, in CSS pixels.
/// Negative values mean the content extends past that edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPosition {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Placement of the content on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl ScreenSize {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }
}

/// Screen placement derived for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenContext {
    pub position: ScreenPosition,
    /// Content placement in CSS pixels.
    pub size: ScreenSize,
    /// Content placement in device pixels.
    pub device_size: ScreenSize,
}

/// Scale/scroll state of a board.
#[derive(Debug, Clone)]
pub struct Viewport {
    context: Context,
}

impl Viewport {
    /// Create a viewport; fails on non-positive dimensions.
    pub fn new(options: BoardOptions) -> CoreResult<Self> {
        options.validate()?;
        Ok(Self {
            context: Context::new(options),
        })
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn options(&self) -> &BoardOptions {
        self.context.options()
    }

    pub fn transform(&self) -> Transform {
        self.context.transform()
    }

    /// Set the zoom factor. Non-positive ratios leave the scale unchanged.
    pub fn scale(&mut self, ratio: f64) -> ScreenContext {
        if ratio > 0.0 {
            self.context.set_transform(TransformPatch::default().with_scale(ratio));
        } else {
            log::warn!("Ignoring non-positive scale ratio {}", ratio);
        }
        self.calculate_screen()
    }

    /// Set the horizontal scroll offset.
    pub fn scroll_x(&mut self, x: f64) -> ScreenContext {
        self.context.set_transform(TransformPatch::default().with_scroll_x(x));
        self.calculate_screen()
    }

    /// Set the vertical scroll offset.
    pub fn scroll_y(&mut self, y: f64) -> ScreenContext {
        self.context.set_transform(TransformPatch::default().with_scroll_y(y));
        self.calculate_screen()
    }

    /// Compute the screen placement for the current transform.
    ///
    /// Content that fits inside the board in both directions is centred, which
    /// overrides any scroll offset.
    pub fn calculate_screen(&mut self) -> ScreenContext {
        let BoardOptions {
            width,
            height,
            context_width,
            context_height,
            device_pixel_ratio,
        } = *self.context.options();
        let scale = self.context.transform().scale;
        let content_w = context_width * scale;
        let content_h = context_height * scale;

        if content_w < width && content_h < height {
            self.context.set_transform(
                TransformPatch::default()
                    .with_scroll_x((width - content_w) / 2.0)
                    .with_scroll_y((height - content_h) / 2.0),
            );
        }

        let Transform {
            scroll_x, scroll_y, ..
        } = self.context.transform();

        let size = ScreenSize {
            x: scroll_x,
            y: scroll_y,
            w: content_w,
            h: content_h,
        };
        let device_size = ScreenSize {
            x: scroll_x * device_pixel_ratio,
            y: scroll_y * device_pixel_ratio,
            w: content_w * device_pixel_ratio,
            h: content_h * device_pixel_ratio,
        };
        let position = ScreenPosition {
            top: scroll_y,
            bottom: height - (content_h + scroll_y),
            left: scroll_x,
            right: width - (content_w + scroll_x),
        };
        ScreenContext {
            position,
            size,
            device_size,
        }
    }

    /// The part of the content (in content coordinates) visible on the board,
    /// or `None` when the board shows no content at all.
    pub fn visible_content_rect(&self) -> Option<Rect> {
        let opts = self.context.options();
        let t = self.context.transform();
        let view = Rect::new(
            -t.scroll_x / t.scale,
            -t.scroll_y / t.scale,
            (opts.width - t.scroll_x) / t.scale,
            (opts.height - t.scroll_y) / t.scale,
        );
        let visible = view.intersect(Rect::new(0.0, 0.0, opts.context_width, opts.context_height));
        (visible.width() > 0.0 && visible.height() > 0.0).then_some(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn viewport() -> Viewport {
        Viewport::new(BoardOptions::new(400.0, 300.0, 800.0, 600.0).with_device_pixel_ratio(2.0)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_options() {
        assert!(Viewport::new(BoardOptions::new(400.0, -1.0, 800.0, 600.0)).is_err());
    }

    #[test]
    fn test_large_content_keeps_scroll() {
        let mut vp = viewport();
        vp.scroll_x(-100.0);
        let screen = vp.scroll_y(-50.0);
        assert!(approx(screen.size.x, -100.0));
        assert!(approx(screen.size.y, -50.0));
        assert!(approx(screen.size.w, 800.0));
        assert!(approx(screen.device_size.x, -200.0));
        assert!(approx(screen.device_size.w, 1600.0));
        assert!(approx(screen.position.left, -100.0));
        assert!(approx(screen.position.top, -50.0));
        assert!(approx(screen.position.right, 400.0 - 700.0));
        assert!(approx(screen.position.bottom, 300.0 - 550.0));
    }

    #[test]
    fn test_small_content_is_centred() {
        let mut vp = viewport();
        vp.scroll_x(-100.0);
        let screen = vp.scale(0.25);
        // 800*0.25 = 200 wide, 600*0.25 = 150 tall inside 400x300.
        assert!(approx(screen.size.x, 100.0));
        assert!(approx(screen.size.y, 75.0));
        assert!(approx(screen.position.left, 100.0));
        assert!(approx(screen.position.right, 100.0));
        assert!(approx(screen.position.top, 75.0));
        assert!(approx(screen.position.bottom, 75.0));
        assert!(approx(vp.transform().scroll_x, 100.0));
    }

    #[test]
    fn test_centring_only_when_both_axes_fit() {
        let mut vp = viewport();
        // 320x240 fits inside 400x300.
        vp.scale(0.4);
        assert!(approx(vp.transform().scroll_x, 40.0));

        // 480x360 overflows both axes; scroll is left alone.
        let mut vp = viewport();
        vp.scroll_x(-7.0);
        vp.scale(0.6);
        assert!(approx(vp.transform().scroll_x, -7.0));
    }

    #[test]
    fn test_invalid_scale_ignored() {
        let mut vp = viewport();
        vp.scale(2.0);
        vp.scale(0.0);
        vp.scale(-3.0);
        assert!(approx(vp.transform().scale, 2.0));
    }

    #[test]
    fn test_visible_content_rect() {
        let mut vp = viewport();
        vp.scale(2.0);
        vp.scroll_x(-200.0);
        vp.scroll_y(-100.0);
        let visible = vp.visible_content_rect().unwrap();
        assert!(approx(visible.x0, 100.0));
        assert!(approx(visible.y0, 50.0));
        assert!(approx(visible.x1, 300.0));
        assert!(approx(visible.y1, 200.0));
    }

    #[test]
    fn test_visible_content_rect_is_clamped_to_content() {
        let mut vp = viewport();
        vp.scale(0.25);
        let visible = vp.visible_content_rect().unwrap();
        assert!(approx(visible.x0, 0.0));
        assert!(approx(visible.y0, 0.0));
        assert!(approx(visible.x1, 800.0));
        assert!(approx(visible.y1, 600.0));
    }

    #[test]
    fn test_no_visible_content_when_scrolled_past() {
        let mut vp = viewport();
        // Content right edge sits exactly on the board's left edge.
        vp.scroll_x(-800.0);
        assert!(vp.visible_content_rect().is_none());
        vp.scroll_x(-5000.0);
        assert!(vp.visible_content_rect().is_none());
        vp.scroll_x(-799.0);
        let visible = vp.visible_content_rect().unwrap();
        assert!(approx(visible.x0, 799.0));
        assert!(approx(visible.x1, 800.0));
    }
}
