//! Scene element definitions.
//!
//! Elements are plain data. The JSON form keeps the `type`/`desc` pair used by
//! scene files:
//!
//! ```json
//! { "uuid": "...", "type": "rect", "x": 10, "y": 10, "w": 100, "h": 50,
//!   "desc": { "color": "#f0f0f0" } }
//! ```

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = String;

/// Generate a fresh element identifier.
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The kind of an element, as written in the `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    Rect,
    Circle,
    Text,
    Image,
    Svg,
    Html,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Rect => "rect",
            ElementType::Circle => "circle",
            ElementType::Text => "text",
            ElementType::Image => "image",
            ElementType::Svg => "svg",
            ElementType::Html => "html",
        }
    }
}

/// A drawable scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Identifier; generated when a scene is loaded without one.
    #[serde(default)]
    pub uuid: ElementId,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Left edge in content pixels.
    pub x: f64,
    /// Top edge in content pixels.
    pub y: f64,
    /// Width in content pixels.
    pub w: f64,
    /// Height in content pixels.
    pub h: f64,
    /// Clockwise rotation in degrees around the element centre.
    #[serde(default)]
    pub angle: f64,
    /// Type tag plus the type-specific description.
    #[serde(flatten)]
    pub detail: ElementDetail,
}

impl Element {
    /// Create a new element with a fresh identifier.
    pub fn new(x: f64, y: f64, w: f64, h: f64, detail: impl Into<ElementDetail>) -> Self {
        Self {
            uuid: new_element_id(),
            name: None,
            x,
            y,
            w,
            h,
            angle: 0.0,
            detail: detail.into(),
        }
    }

    /// Set the rotation in degrees.
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set an explicit identifier.
    pub fn with_uuid(mut self, uuid: impl Into<ElementId>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn kind(&self) -> ElementType {
        self.detail.kind()
    }

    /// The unrotated element box in content coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Rotation in radians.
    pub fn angle_rad(&self) -> f64 {
        self.angle.to_radians()
    }

    pub fn is_rotated(&self) -> bool {
        self.angle.rem_euclid(360.0).abs() > f64::EPSILON
    }
}

/// Type-specific element data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "desc", rename_all = "lowercase")]
pub enum ElementDetail {
    Rect(RectDesc),
    Circle(CircleDesc),
    Text(TextDesc),
    Image(ImageDesc),
    Svg(SvgDesc),
    Html(HtmlDesc),
}

impl ElementDetail {
    pub fn kind(&self) -> ElementType {
        match self {
            ElementDetail::Rect(_) => ElementType::Rect,
            ElementDetail::Circle(_) => ElementType::Circle,
            ElementDetail::Text(_) => ElementType::Text,
            ElementDetail::Image(_) => ElementType::Image,
            ElementDetail::Svg(_) => ElementType::Svg,
            ElementDetail::Html(_) => ElementType::Html,
        }
    }
}

macro_rules! impl_into_detail {
    ($($desc:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$desc> for ElementDetail {
                fn from(desc: $desc) -> Self {
                    ElementDetail::$variant(desc)
                }
            }
        )*
    };
}

impl_into_detail! {
    RectDesc => Rect,
    CircleDesc => Circle,
    TextDesc => Text,
    ImageDesc => Image,
    SvgDesc => Svg,
    HtmlDesc => Html,
}

/// Rectangle description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RectDesc {
    /// Fill colour (CSS syntax).
    pub color: String,
    pub border_radius: f64,
    pub border_width: f64,
    pub border_color: String,
}

impl Default for RectDesc {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            border_radius: 0.0,
            border_width: 0.0,
            border_color: "#000000".to_string(),
        }
    }
}

/// Circle description. The circle is the ellipse inscribed in the element box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CircleDesc {
    pub color: String,
    pub border_width: f64,
    pub border_color: String,
}

impl Default for CircleDesc {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            border_width: 0.0,
            border_color: "#000000".to_string(),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextDesc {
    pub text: String,
    pub color: String,
    pub font_size: f64,
    pub font_family: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Line height in content pixels; falls back to the font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    pub text_align: TextAlign,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    pub border_radius: f64,
    pub border_width: f64,
    pub border_color: String,
}

impl TextDesc {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn line_height(&self) -> f64 {
        self.line_height.unwrap_or(self.font_size)
    }

    /// CSS font shorthand for this description.
    pub fn font(&self) -> String {
        match &self.font_weight {
            Some(weight) => format!("{} {}px {}", weight, self.font_size, self.font_family),
            None => format!("{}px {}", self.font_size, self.font_family),
        }
    }
}

impl Default for TextDesc {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: "#000000".to_string(),
            font_size: 12.0,
            font_family: "sans-serif".to_string(),
            font_weight: None,
            line_height: None,
            text_align: TextAlign::Left,
            bg_color: None,
            border_radius: 0.0,
            border_width: 0.0,
            border_color: "#000000".to_string(),
        }
    }
}

/// Raster image description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageDesc {
    /// Image URL or data URL.
    pub src: String,
}

/// Inline SVG description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SvgDesc {
    /// SVG markup.
    pub svg: String,
}

/// Inline HTML description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlDesc {
    /// HTML markup.
    pub html: String,
    /// Width of the html document box; defaults to the element width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Height of the html document box; defaults to the element height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_element_from_json() {
        let json = r##"{
            "uuid": "a1",
            "type": "rect",
            "x": 10, "y": 20, "w": 100, "h": 50,
            "desc": { "color": "#f0f0f0", "borderRadius": 4 }
        }"##;
        let elem: Element = serde_json::from_str(json).unwrap();
        assert_eq!(elem.uuid, "a1");
        assert_eq!(elem.kind(), ElementType::Rect);
        assert!((elem.w - 100.0).abs() < f64::EPSILON);
        match &elem.detail {
            ElementDetail::Rect(desc) => {
                assert_eq!(desc.color, "#f0f0f0");
                assert!((desc.border_radius - 4.0).abs() < f64::EPSILON);
                assert_eq!(desc.border_color, "#000000");
            }
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_element_json_keeps_type_and_desc() {
        let elem = Element::new(0.0, 0.0, 10.0, 10.0, SvgDesc { svg: "<svg/>".into() });
        let value = serde_json::to_value(&elem).unwrap();
        assert_eq!(value["type"], "svg");
        assert_eq!(value["desc"]["svg"], "<svg/>");
        assert!(value.get("name").is_none());
    }

    #[test]
    fn test_missing_uuid_and_angle_default() {
        let json = r#"{ "type": "circle", "x": 0, "y": 0, "w": 4, "h": 4, "desc": {} }"#;
        let elem: Element = serde_json::from_str(json).unwrap();
        assert!(elem.uuid.is_empty());
        assert!(elem.angle.abs() < f64::EPSILON);
        assert_eq!(elem.kind(), ElementType::Circle);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let json = r#"{ "type": "hexagon", "x": 0, "y": 0, "w": 4, "h": 4, "desc": {} }"#;
        assert!(serde_json::from_str::<Element>(json).is_err());
    }

    #[test]
    fn test_text_font_and_line_height() {
        let mut desc = TextDesc::new("hello");
        desc.font_size = 16.0;
        assert!((desc.line_height() - 16.0).abs() < f64::EPSILON);
        assert_eq!(desc.font(), "16px sans-serif");
        desc.font_weight = Some("bold".into());
        desc.line_height = Some(20.0);
        assert_eq!(desc.font(), "bold 16px sans-serif");
        assert!((desc.line_height() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rect_and_center() {
        let elem = Element::new(10.0, 20.0, 100.0, 50.0, RectDesc::default());
        let rect = elem.rect();
        assert!((rect.x1 - 110.0).abs() < f64::EPSILON);
        assert!((rect.y1 - 70.0).abs() < f64::EPSILON);
        assert_eq!(elem.center(), Point::new(60.0, 45.0));
        assert!(!elem.is_rotated());
        assert!(elem.clone().with_angle(30.0).is_rotated());
        assert!(!elem.with_angle(360.0).is_rotated());
    }
}
