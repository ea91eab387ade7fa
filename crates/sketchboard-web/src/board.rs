//! Canvas board: DOM mount, origin and display canvases, input events.
//!
//! The scene is painted onto the offscreen *origin* canvas, which covers the
//! whole content at device resolution. [`Board::draw`] copies it onto the
//! on-screen *display* canvas at the placement the viewport computed.

use crate::error::{WebError, WebResult};
use crate::options::device_pixels;
use crate::watcher::Watcher;
use sketchboard_core::context::BoardOptions;
use sketchboard_core::events::{BoardEvent, BoardEventKind, EventEmitter, ListenerId};
use sketchboard_core::viewport::ScreenContext;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

fn document() -> WebResult<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| WebError::Dom("no document".into()))
}

/// A mounted board.
pub struct Board {
    mount: HtmlElement,
    options: BoardOptions,
    origin_canvas: HtmlCanvasElement,
    origin_ctx: CanvasRenderingContext2d,
    display_canvas: HtmlCanvasElement,
    display_ctx: CanvasRenderingContext2d,
    emitter: Rc<RefCell<EventEmitter>>,
    _watcher: Watcher,
}

impl Board {
    /// Create both canvases, append the display canvas to `mount` and start
    /// watching input.
    pub fn new(mount: HtmlElement, options: BoardOptions) -> WebResult<Self> {
        options.validate()?;
        let ratio = options.device_pixel_ratio;

        let origin_canvas = Self::create_canvas(options.context_width, options.context_height, ratio)?;
        let origin_ctx = Self::create_context(&origin_canvas)?;
        let display_canvas = Self::create_canvas(options.width, options.height, ratio)?;
        let display_ctx = Self::create_context(&display_canvas)?;
        mount.append_child(&display_canvas)?;

        let emitter = Rc::new(RefCell::new(EventEmitter::new()));
        let watcher = Watcher::new(&display_canvas, emitter.clone())?;

        log::info!(
            "Board mounted: {}x{} board, {}x{} content, ratio {}",
            options.width,
            options.height,
            options.context_width,
            options.context_height,
            ratio
        );
        Ok(Self {
            mount,
            options,
            origin_canvas,
            origin_ctx,
            display_canvas,
            display_ctx,
            emitter,
            _watcher: watcher,
        })
    }

    /// A canvas with a `width` x `height` CSS size and a backing store scaled
    /// by `ratio`.
    pub fn create_canvas(width: f64, height: f64, ratio: f64) -> WebResult<HtmlCanvasElement> {
        let canvas = document()?
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| WebError::Dom("created element is not a canvas".into()))?;
        canvas.set_width(device_pixels(width, ratio));
        canvas.set_height(device_pixels(height, ratio));
        let style = canvas.style();
        style.set_property("width", &format!("{}px", width))?;
        style.set_property("height", &format!("{}px", height))?;
        Ok(canvas)
    }

    pub fn create_context(canvas: &HtmlCanvasElement) -> WebResult<CanvasRenderingContext2d> {
        canvas
            .get_context("2d")?
            .ok_or_else(|| WebError::Dom("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| WebError::Dom("context is not a 2d context".into()))
    }

    pub fn options(&self) -> &BoardOptions {
        &self.options
    }

    pub fn origin_context(&self) -> &CanvasRenderingContext2d {
        &self.origin_ctx
    }

    pub fn display_context(&self) -> &CanvasRenderingContext2d {
        &self.display_ctx
    }

    pub fn display_canvas(&self) -> &HtmlCanvasElement {
        &self.display_canvas
    }

    /// Copy the origin canvas onto the display canvas.
    pub fn draw(&self, screen: &ScreenContext) -> WebResult<()> {
        let ratio = self.options.device_pixel_ratio;
        let ctx = &self.display_ctx;
        ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        ctx.clear_rect(0.0, 0.0, self.options.width * ratio, self.options.height * ratio);
        let target = screen.device_size;
        ctx.draw_image_with_html_canvas_element_and_dw_and_dh(
            &self.origin_canvas,
            target.x,
            target.y,
            target.w,
            target.h,
        )?;
        Ok(())
    }

    /// Clear both canvases.
    pub fn clear(&self) -> WebResult<()> {
        let ratio = self.options.device_pixel_ratio;
        for (ctx, w, h) in [
            (&self.origin_ctx, self.options.context_width, self.options.context_height),
            (&self.display_ctx, self.options.width, self.options.height),
        ] {
            ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
            ctx.clear_rect(0.0, 0.0, w * ratio, h * ratio);
        }
        Ok(())
    }

    /// Subscribe to board events.
    pub fn on(&self, kind: BoardEventKind, listener: impl FnMut(&BoardEvent) + 'static) -> WebResult<ListenerId> {
        let mut emitter = self.emitter.try_borrow_mut().map_err(|_| WebError::Busy)?;
        Ok(emitter.on(kind, listener))
    }

    pub fn off(&self, kind: BoardEventKind, id: ListenerId) -> WebResult<bool> {
        let mut emitter = self.emitter.try_borrow_mut().map_err(|_| WebError::Busy)?;
        Ok(emitter.off(kind, id))
    }
}

impl Drop for Board {
    fn drop(&mut self) {
        if let Err(e) = self.mount.remove_child(&self.display_canvas) {
            log::warn!("Failed to unmount board canvas: {:?}", e);
        }
    }
}
