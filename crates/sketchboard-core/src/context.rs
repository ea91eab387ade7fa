//! Drawing context: board options plus the mutable view transform.

use crate::error::{CoreError, CoreResult};
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// View transform between content space and screen (CSS pixel) space.
///
/// A content point `c` is shown at `c * scale + scroll`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Zoom factor, always > 0.
    pub scale: f64,
    /// Horizontal offset of the content origin in screen pixels.
    pub scroll_x: f64,
    /// Vertical offset of the content origin in screen pixels.
    pub scroll_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }
}

/// Partial transform update. Unset fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub scale: Option<f64>,
    pub scroll_x: Option<f64>,
    pub scroll_y: Option<f64>,
}

impl TransformPatch {
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_scroll_x(mut self, x: f64) -> Self {
        self.scroll_x = Some(x);
        self
    }

    pub fn with_scroll_y(mut self, y: f64) -> Self {
        self.scroll_y = Some(y);
        self
    }
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

/// Board dimensions.
///
/// `width`/`height` are the on-screen board size, `context_width`/
/// `context_height` the size of the drawable content, all in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardOptions {
    pub width: f64,
    pub height: f64,
    pub context_width: f64,
    pub context_height: f64,
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl BoardOptions {
    pub fn new(width: f64, height: f64, context_width: f64, context_height: f64) -> Self {
        Self {
            width,
            height,
            context_width,
            context_height,
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    /// Check that all dimensions are positive and finite.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("contextWidth", self.context_width),
            ("contextHeight", self.context_height),
            ("devicePixelRatio", self.device_pixel_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::InvalidOption(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Drawing context state shared by hit-testing, the helper and the renderer.
#[derive(Debug, Clone)]
pub struct Context {
    options: BoardOptions,
    transform: Transform,
}

impl Context {
    pub fn new(options: BoardOptions) -> Self {
        Self {
            options,
            transform: Transform::default(),
        }
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.options.device_pixel_ratio
    }

    /// Apply a partial transform update.
    ///
    /// Non-positive or non-finite scales and non-finite scrolls are ignored.
    pub fn set_transform(&mut self, patch: TransformPatch) {
        if let Some(scale) = patch.scale {
            if scale.is_finite() && scale > 0.0 {
                self.transform.scale = scale;
            } else {
                log::warn!("Ignoring invalid scale {}", scale);
            }
        }
        if let Some(x) = patch.scroll_x {
            if x.is_finite() {
                self.transform.scroll_x = x;
            } else {
                log::warn!("Ignoring invalid scrollX {}", x);
            }
        }
        if let Some(y) = patch.scroll_y {
            if y.is_finite() {
                self.transform.scroll_y = y;
            } else {
                log::warn!("Ignoring invalid scrollY {}", y);
            }
        }
    }

    /// Content → screen transform.
    pub fn affine(&self) -> Affine {
        let t = self.transform;
        Affine::translate(Vec2::new(t.scroll_x, t.scroll_y)) * Affine::scale(t.scale)
    }

    /// Content → device pixel transform.
    pub fn device_affine(&self) -> Affine {
        Affine::scale(self.options.device_pixel_ratio) * self.affine()
    }

    /// Convert a screen point to content coordinates.
    pub fn screen_to_content(&self, point: Point) -> Point {
        let t = self.transform;
        Point::new(
            (point.x - t.scroll_x) / t.scale,
            (point.y - t.scroll_y) / t.scale,
        )
    }

    /// Convert a content point to screen coordinates.
    pub fn content_to_screen(&self, point: Point) -> Point {
        self.affine() * point
    }
}
