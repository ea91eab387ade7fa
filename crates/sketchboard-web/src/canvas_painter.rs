//! [`Painter`] over `CanvasRenderingContext2d`.

use kurbo::{Affine, Point, Rect, Vec2};
use sketchboard_core::element::TextAlign;
use sketchboard_render::{Painter, RenderResult, RendererError, TextBaseline, text_align_str};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, Event, HtmlImageElement};

/// Image state of one element.
#[derive(Default)]
struct ImageEntry {
    /// Last url that finished loading, with its image.
    ready: Option<(String, HtmlImageElement)>,
    /// Url currently loading. At most one load runs per element.
    loading: Option<String>,
    failed: Option<String>,
}

type ImageCache = Rc<RefCell<HashMap<String, ImageEntry>>>;

fn draw_failed(e: JsValue) -> RendererError {
    RendererError::DrawFailed(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// Paints onto a 2D canvas context.
///
/// Images are loaded on first use and cached per element. While the first
/// image of an element loads, `draw_image` reports it as pending. When the url
/// of an element changes, its previous image is drawn stretched until the new
/// one arrives. Once a load settles the `on_image_ready` hook runs so the
/// owner can repaint; the repaint starts the next load if the url moved on in
/// the meantime.
pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
    images: ImageCache,
    used: HashSet<String>,
    on_image_ready: Option<Rc<dyn Fn()>>,
}

impl CanvasPainter {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            images: Rc::new(RefCell::new(HashMap::new())),
            used: HashSet::new(),
            on_image_ready: None,
        }
    }

    /// Called whenever an image finishes loading or fails.
    pub fn set_on_image_ready(&mut self, hook: Rc<dyn Fn()>) {
        self.on_image_ready = Some(hook);
    }

    pub fn context(&self) -> &CanvasRenderingContext2d {
        &self.ctx
    }

    /// Forget cached images after the scene was replaced.
    pub fn clear_images(&mut self) {
        self.images.borrow_mut().clear();
    }

    fn start_loading(&self, key: &str, url: &str) -> RenderResult<()> {
        let img = HtmlImageElement::new().map_err(draw_failed)?;

        let images = Rc::downgrade(&self.images);
        let hook = self.on_image_ready.clone();
        let key = key.to_string();
        let loaded_url = url.to_string();
        let loaded_img = img.clone();
        // Shared by onload and onerror; only one of them fires, and the
        // closure is freed after its single call.
        let settle = Closure::once_into_js(move |event: Event| {
            let Some(images) = images.upgrade() else {
                return;
            };
            {
                let mut images = images.borrow_mut();
                let Some(entry) = images.get_mut(&key) else {
                    return;
                };
                if entry.loading.as_deref() == Some(loaded_url.as_str()) {
                    entry.loading = None;
                }
                if event.type_() == "load" {
                    entry.ready = Some((loaded_url, loaded_img));
                    entry.failed = None;
                } else {
                    log::error!("Failed to load image for element {}", key);
                    entry.failed = Some(loaded_url);
                }
            }
            if let Some(hook) = &hook {
                hook();
            }
        });
        img.set_onload(Some(settle.unchecked_ref()));
        img.set_onerror(Some(settle.unchecked_ref()));
        img.set_src(url);
        Ok(())
    }

    fn blit(&self, img: &HtmlImageElement, rect: Rect) -> RenderResult<()> {
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(img, rect.x0, rect.y0, rect.width(), rect.height())
            .map_err(draw_failed)
    }
}

impl Painter for CanvasPainter {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn set_transform(&mut self, affine: Affine) -> RenderResult<()> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        self.ctx.set_transform(a, b, c, d, e, f).map_err(draw_failed)
    }

    fn transform(&mut self, affine: Affine) -> RenderResult<()> {
        let [a, b, c, d, e, f] = affine.as_coeffs();
        self.ctx.transform(a, b, c, d, e, f).map_err(draw_failed)
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.ctx.clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_fill_style(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.ctx.set_stroke_style_str(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_dash(&mut self, segments: &[f64]) -> RenderResult<()> {
        let array = js_sys::Array::new();
        for segment in segments {
            array.push(&JsValue::from_f64(*segment));
        }
        self.ctx.set_line_dash(&array).map_err(draw_failed)
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, p: Point) {
        self.ctx.move_to(p.x, p.y);
    }

    fn line_to(&mut self, p: Point) {
        self.ctx.line_to(p.x, p.y);
    }

    fn arc_to(&mut self, p1: Point, p2: Point, radius: f64) -> RenderResult<()> {
        self.ctx.arc_to(p1.x, p1.y, p2.x, p2.y, radius).map_err(draw_failed)
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64) -> RenderResult<()> {
        self.ctx.arc(center.x, center.y, radius, start, end).map_err(draw_failed)
    }

    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64, start: f64, end: f64) -> RenderResult<()> {
        self.ctx
            .ellipse(center.x, center.y, radii.x, radii.y, rotation, start, end)
            .map_err(draw_failed)
    }

    fn rect(&mut self, rect: Rect) {
        self.ctx.rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, rect: Rect) {
        self.ctx.fill_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn stroke_rect(&mut self, rect: Rect) {
        self.ctx.stroke_rect(rect.x0, rect.y0, rect.width(), rect.height());
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.ctx.set_text_align(text_align_str(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.ctx.set_text_baseline(baseline.as_str());
    }

    fn fill_text(&mut self, text: &str, at: Point) -> RenderResult<()> {
        self.ctx.fill_text(text, at.x, at.y).map_err(draw_failed)
    }

    fn measure_text(&mut self, text: &str) -> RenderResult<f64> {
        self.ctx
            .measure_text(text)
            .map(|metrics| metrics.width())
            .map_err(draw_failed)
    }

    fn draw_image(&mut self, key: &str, url: &str, rect: Rect) -> RenderResult<bool> {
        self.used.insert(key.to_string());
        let (shown, start) = {
            let mut images = self.images.borrow_mut();
            let entry = images.entry(key.to_string()).or_default();
            if let Some((ready_url, img)) = &entry.ready {
                if ready_url == url {
                    self.blit(img, rect)?;
                    return Ok(true);
                }
            }
            if entry.failed.as_deref() == Some(url) {
                return Err(RendererError::Resource(format!("image failed to load: {}", url)));
            }
            let start = entry.loading.is_none();
            if start {
                entry.loading = Some(url.to_string());
            }
            (entry.ready.as_ref().map(|(_, img)| img.clone()), start)
        };
        if start {
            if let Err(e) = self.start_loading(key, url) {
                if let Some(entry) = self.images.borrow_mut().get_mut(key) {
                    entry.loading = None;
                }
                return Err(e);
            }
        }
        match shown {
            Some(stale) => {
                self.blit(&stale, rect)?;
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
        self.images.borrow_mut().retain(|key, _| used.contains(key));
    }
}
