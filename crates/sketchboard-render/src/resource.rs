//! Image sources for image, svg and html elements.
//!
//! Everything that is painted as a bitmap goes through one URL: images use
//! their `src`, svg markup is base64 encoded into a data URL, and html is
//! wrapped in an svg `foreignObject` first.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use sketchboard_core::element::{Element, ElementDetail};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// Where a bitmap element's pixels come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResourceSource<'a> {
    /// A plain URL or data URL.
    Url(&'a str),
    /// Inline svg markup.
    Svg(&'a str),
    /// Inline html laid out in a `width` x `height` box.
    Html { html: &'a str, width: f64, height: f64 },
}

impl<'a> ResourceSource<'a> {
    /// The source of an element, if it is painted as a bitmap.
    pub fn from_element(elem: &'a Element) -> Option<Self> {
        match &elem.detail {
            ElementDetail::Image(desc) => Some(ResourceSource::Url(&desc.src)),
            ElementDetail::Svg(desc) => Some(ResourceSource::Svg(&desc.svg)),
            ElementDetail::Html(desc) => Some(ResourceSource::Html {
                html: &desc.html,
                width: desc.width.unwrap_or(elem.w),
                height: desc.height.unwrap_or(elem.h),
            }),
            ElementDetail::Rect(_) | ElementDetail::Circle(_) | ElementDetail::Text(_) => None,
        }
    }

    /// URL a painter can load.
    pub fn to_url(&self) -> String {
        match *self {
            ResourceSource::Url(src) => src.to_string(),
            ResourceSource::Svg(svg) => svg_data_url(svg),
            ResourceSource::Html { html, width, height } => svg_data_url(&html_to_svg(html, width, height)),
        }
    }
}

/// Encode svg markup as a `data:image/svg+xml;base64,` URL.
pub fn svg_data_url(svg: &str) -> String {
    format!("data:image/svg+xml;base64,{}", STANDARD.encode(svg.as_bytes()))
}

/// Wrap html in an svg document so it can be drawn as an image.
pub fn html_to_svg(html: &str, width: f64, height: f64) -> String {
    format!(
        r#"<svg xmlns="{SVG_NS}" width="{width}" height="{height}"><foreignObject width="100%" height="100%"><div xmlns="{XHTML_NS}">{html}</div></foreignObject></svg>"#
    )
}

/// Image URL for a bitmap element; `None` for vector elements.
pub fn element_image_url(elem: &Element) -> Option<String> {
    ResourceSource::from_element(elem).map(|source| source.to_url())
}
