//! Widget construction options.

use kurbo::Point;
use serde::Deserialize;
use sketchboard_core::context::BoardOptions;

/// Options passed to the widget constructor from JavaScript.
///
/// ```js
/// new Sketchboard(mount, { width: 600, height: 400, devicePixelRatio: 2 });
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    /// Board width in CSS pixels.
    pub width: f64,
    /// Board height in CSS pixels.
    pub height: f64,
    /// Content width; defaults to the board width.
    #[serde(default)]
    pub context_width: Option<f64>,
    /// Content height; defaults to the board height.
    #[serde(default)]
    pub context_height: Option<f64>,
    /// Defaults to the window's ratio.
    #[serde(default)]
    pub device_pixel_ratio: Option<f64>,
}

impl WidgetOptions {
    pub fn board_options(&self, window_ratio: f64) -> BoardOptions {
        let ratio = self
            .device_pixel_ratio
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(if window_ratio > 0.0 { window_ratio } else { 1.0 });
        BoardOptions::new(
            self.width,
            self.height,
            self.context_width.unwrap_or(self.width),
            self.context_height.unwrap_or(self.height),
        )
        .with_device_pixel_ratio(ratio)
    }
}

/// Backing store size of a canvas in device pixels.
pub fn device_pixels(css: f64, ratio: f64) -> u32 {
    (css * ratio).round().max(0.0) as u32
}

/// Convert client coordinates to board coordinates given the canvas's
/// bounding box origin.
pub fn client_to_board(client: Point, left: f64, top: f64) -> Point {
    Point::new(client.x - left, client.y - top)
}
