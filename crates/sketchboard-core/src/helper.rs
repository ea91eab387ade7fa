//! Selection helper: computes the wrapper drawn around the selected element
//! and the resize dots on it.

use crate::config::{Config, ElementWrapperConfig};
use crate::context::Context;
use crate::data::Data;
use crate::element::ElementId;
use crate::hit::rotate_point;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Position of a resize dot on the selection wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotPosition {
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl DotPosition {
    /// All dot positions, corners first.
    pub const ALL: [DotPosition; 8] = [
        DotPosition::TopLeft,
        DotPosition::TopRight,
        DotPosition::BottomLeft,
        DotPosition::BottomRight,
        DotPosition::Top,
        DotPosition::Bottom,
        DotPosition::Left,
        DotPosition::Right,
    ];

    /// Horizontal and vertical side of the box this dot sits on:
    /// -1 = left/top, 0 = middle, 1 = right/bottom.
    pub fn factors(&self) -> (f64, f64) {
        match self {
            DotPosition::Top => (0.0, -1.0),
            DotPosition::Bottom => (0.0, 1.0),
            DotPosition::Left => (-1.0, 0.0),
            DotPosition::Right => (1.0, 0.0),
            DotPosition::TopLeft => (-1.0, -1.0),
            DotPosition::TopRight => (1.0, -1.0),
            DotPosition::BottomLeft => (-1.0, 1.0),
            DotPosition::BottomRight => (1.0, 1.0),
        }
    }

    /// The dot's point on an unrotated rectangle.
    pub fn point_on(&self, rect: Rect) -> Point {
        let (fx, fy) = self.factors();
        let center = rect.center();
        Point::new(
            center.x + fx * rect.width() / 2.0,
            center.y + fy * rect.height() / 2.0,
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DotPosition::Top => "top",
            DotPosition::Bottom => "bottom",
            DotPosition::Left => "left",
            DotPosition::Right => "right",
            DotPosition::TopLeft => "top-left",
            DotPosition::TopRight => "top-right",
            DotPosition::BottomLeft => "bottom-left",
            DotPosition::BottomRight => "bottom-right",
        }
    }
}

/// A resize dot in content coordinates (rotation applied).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WrapperDot {
    pub position: DotPosition,
    pub center: Point,
}

/// Selection wrapper around one element, in content coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementWrapper {
    pub uuid: ElementId,
    pub color: String,
    /// Line width in content pixels.
    pub line_width: f64,
    /// Dot radius in content pixels.
    pub dot_size: f64,
    /// Rotation in degrees around `center`.
    pub angle: f64,
    pub center: Point,
    /// Unrotated wrapper rectangle.
    pub rect: Rect,
    pub dots: Vec<WrapperDot>,
}

impl ElementWrapper {
    pub fn dot(&self, position: DotPosition) -> Option<&WrapperDot> {
        self.dots.iter().find(|d| d.position == position)
    }

    /// Wrapper corners (top-left, top-right, bottom-right, bottom-left) with
    /// rotation applied.
    pub fn vertexes(&self) -> [Point; 4] {
        rotated_vertexes(self.rect, self.center, self.angle.to_radians())
    }
}

fn rotated_vertexes(rect: Rect, center: Point, angle: f64) -> [Point; 4] {
    [
        Point::new(rect.x0, rect.y0),
        Point::new(rect.x1, rect.y0),
        Point::new(rect.x1, rect.y1),
        Point::new(rect.x0, rect.y1),
    ]
    .map(|p| rotate_point(p, center, angle))
}

/// One resize controller: the dot kind and the square it covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ElementSizeControllerItem {
    pub position: DotPosition,
    pub vertexes: [Point; 4],
}

/// Wrapper outline plus one controller per dot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSizeController {
    pub element_wrapper: [Point; 4],
    pub controllers: Vec<ElementSizeControllerItem>,
}

impl ElementSizeController {
    pub fn get(&self, position: DotPosition) -> Option<&ElementSizeControllerItem> {
        self.controllers.iter().find(|c| c.position == position)
    }
}

/// Output of the helper for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HelperConfig {
    pub device_pixel_ratio: f64,
    pub scale: f64,
    pub selected_element_wrapper: Option<ElementWrapper>,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            device_pixel_ratio: 1.0,
            scale: 1.0,
            selected_element_wrapper: None,
        }
    }
}

/// Inputs for [`Helper::update_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct HelperUpdateOptions {
    pub selected_uuid: Option<ElementId>,
    pub device_pixel_ratio: f64,
    pub scale: f64,
}

/// Computes and hit-tests the selection wrapper.
#[derive(Debug, Clone)]
pub struct Helper {
    wrapper_config: ElementWrapperConfig,
    helper_config: HelperConfig,
}

impl Helper {
    pub fn new(config: &Config) -> Self {
        Self {
            wrapper_config: config.element_wrapper.clone(),
            helper_config: HelperConfig::default(),
        }
    }

    /// Replace the wrapper styling.
    pub fn set_config(&mut self, config: &Config) {
        self.wrapper_config = config.element_wrapper.clone();
    }

    /// Recompute the helper output for the current selection.
    ///
    /// A selected uuid that is not in `data` yields no wrapper.
    pub fn update_config(&mut self, data: &Data, opts: HelperUpdateOptions) -> &HelperConfig {
        let scale = if opts.scale > 0.0 { opts.scale } else { 1.0 };
        let wrapper = opts
            .selected_uuid
            .as_deref()
            .and_then(|uuid| data.get(uuid))
            .map(|elem| {
                let dot_size = self.wrapper_config.dot_size / scale;
                let line_width = self.wrapper_config.line_width / scale;
                let rect = elem.rect().inflate(dot_size, dot_size);
                let center = elem.center();
                let angle = elem.angle_rad();
                let dots = DotPosition::ALL
                    .iter()
                    .map(|&position| WrapperDot {
                        position,
                        center: rotate_point(position.point_on(rect), center, angle),
                    })
                    .collect();
                ElementWrapper {
                    uuid: elem.uuid.clone(),
                    color: self.wrapper_config.color.clone(),
                    line_width,
                    dot_size,
                    angle: elem.angle,
                    center,
                    rect,
                    dots,
                }
            });

        self.helper_config = HelperConfig {
            device_pixel_ratio: opts.device_pixel_ratio,
            scale,
            selected_element_wrapper: wrapper,
        };
        &self.helper_config
    }

    /// The last computed helper output.
    pub fn config(&self) -> &HelperConfig {
        &self.helper_config
    }

    /// Find the wrapper dot under a screen point.
    pub fn is_point_in_element_wrapper_dot(
        &self,
        point: Point,
        ctx: &Context,
    ) -> Option<(ElementId, DotPosition)> {
        let wrapper = self.helper_config.selected_element_wrapper.as_ref()?;
        let content = ctx.screen_to_content(point);
        let radius = wrapper.dot_size;
        wrapper
            .dots
            .iter()
            .find(|dot| (content - dot.center).hypot() <= radius)
            .map(|dot| (wrapper.uuid.clone(), dot.position))
    }

    /// Resize controllers for the current wrapper.
    pub fn size_controller(&self) -> Option<ElementSizeController> {
        let wrapper = self.helper_config.selected_element_wrapper.as_ref()?;
        let angle = wrapper.angle.to_radians();
        let controllers = DotPosition::ALL
            .iter()
            .map(|&position| {
                let dot = position.point_on(wrapper.rect);
                let square = Rect::from_center_size(dot, (wrapper.dot_size * 2.0, wrapper.dot_size * 2.0));
                ElementSizeControllerItem {
                    position,
                    vertexes: rotated_vertexes(square, wrapper.center, angle),
                }
            })
            .collect();
        Some(ElementSizeController {
            element_wrapper: wrapper.vertexes(),
            controllers,
        })
    }
}
