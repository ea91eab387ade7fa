//! The `Sketchboard` widget exported to JavaScript.

use crate::board::Board;
use crate::canvas_painter::CanvasPainter;
use crate::error::{WebError, WebResult};
use crate::options::WidgetOptions;
use serde::Serialize;
use sketchboard_core::config::{Config, PartialConfig, merge_config};
use sketchboard_core::data::Data;
use sketchboard_core::editor::Editor;
use sketchboard_core::element::Element;
use sketchboard_core::events::{BoardEvent, BoardEventKind, ListenerId};
use sketchboard_core::viewport::ScreenContext;
use sketchboard_render::Renderer;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

/// Events routed into the editor.
const EDITOR_EVENTS: [BoardEventKind; 4] = [
    BoardEventKind::Point,
    BoardEventKind::MoveStart,
    BoardEventKind::Move,
    BoardEventKind::MoveEnd,
];

/// Payload passed to JavaScript listeners.
#[derive(Serialize)]
struct EventPayload {
    x: f64,
    y: f64,
}

struct Inner {
    board: Board,
    editor: Editor,
    renderer: Renderer,
    painter: CanvasPainter,
}

impl Inner {
    /// Paint the scene onto the origin canvas and show it.
    fn render(&mut self) -> WebResult<ScreenContext> {
        let screen = self.editor.screen();
        let frame = self.editor.draw();
        self.renderer.render_frame(&mut self.painter, &frame)?;
        self.board.draw(&screen)?;
        Ok(screen)
    }
}

fn redraw(inner: &Weak<RefCell<Inner>>) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let Ok(mut inner) = inner.try_borrow_mut() else {
        log::warn!("Skipping redraw: board is busy");
        return;
    };
    if let Err(e) = inner.render() {
        log::error!("Redraw failed: {}", e);
    }
}

fn to_js<T: Serialize>(value: &T) -> WebResult<JsValue> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

/// A whiteboard mounted into a DOM element.
#[wasm_bindgen]
pub struct Sketchboard {
    inner: Rc<RefCell<Inner>>,
}

impl Sketchboard {
    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> WebResult<T>) -> WebResult<T> {
        let mut inner = self.inner.try_borrow_mut().map_err(|_| WebError::Busy)?;
        f(&mut inner)
    }

    /// Route pointer events from the board into the editor.
    fn route_events(&self) -> WebResult<()> {
        let board_inner = self.inner.try_borrow().map_err(|_| WebError::Busy)?;
        for kind in EDITOR_EVENTS {
            let weak = Rc::downgrade(&self.inner);
            board_inner.board.on(kind, move |event: &BoardEvent| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let Ok(mut inner) = inner.try_borrow_mut() else {
                    log::warn!("Dropping {} event: board is busy", event.kind());
                    return;
                };
                let outcome = inner.editor.handle_event(event);
                if outcome.redraw {
                    if let Err(e) = inner.render() {
                        log::error!("Redraw failed: {}", e);
                    }
                }
            })?;
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl Sketchboard {
    /// Mount a board into `mount`.
    ///
    /// `options` is `{ width, height, contextWidth?, contextHeight?,
    /// devicePixelRatio? }`; `config` is an optional partial config.
    #[wasm_bindgen(constructor)]
    pub fn new(mount: HtmlElement, options: JsValue, config: JsValue) -> Result<Sketchboard, JsValue> {
        let options: WidgetOptions = serde_wasm_bindgen::from_value(options).map_err(WebError::from)?;
        let window_ratio = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let board_options = options.board_options(window_ratio);

        let config = if config.is_undefined() || config.is_null() {
            Config::default()
        } else {
            let partial: PartialConfig = serde_wasm_bindgen::from_value(config).map_err(WebError::from)?;
            merge_config(partial)
        };

        let editor = Editor::new(board_options, config).map_err(WebError::from)?;
        let board = Board::new(mount, board_options)?;
        let painter = CanvasPainter::new(board.origin_context().clone());
        let inner = Rc::new(RefCell::new(Inner {
            board,
            editor,
            renderer: Renderer::new(),
            painter,
        }));

        let weak = Rc::downgrade(&inner);
        inner
            .borrow_mut()
            .painter
            .set_on_image_ready(Rc::new(move || redraw(&weak)));

        let widget = Sketchboard { inner };
        widget.route_events()?;
        Ok(widget)
    }

    /// Repaint and return the screen placement.
    pub fn draw(&self) -> Result<JsValue, JsValue> {
        let screen = self.with_inner(Inner::render)?;
        Ok(to_js(&screen)?)
    }

    /// Set the zoom factor and repaint.
    pub fn scale(&self, ratio: f64) -> Result<JsValue, JsValue> {
        let screen = self.with_inner(|inner| {
            inner.editor.scale(ratio);
            inner.render()
        })?;
        Ok(to_js(&screen)?)
    }

    #[wasm_bindgen(js_name = scrollX)]
    pub fn scroll_x(&self, x: f64) -> Result<JsValue, JsValue> {
        let screen = self.with_inner(|inner| {
            inner.editor.scroll_x(x);
            inner.render()
        })?;
        Ok(to_js(&screen)?)
    }

    #[wasm_bindgen(js_name = scrollY)]
    pub fn scroll_y(&self, y: f64) -> Result<JsValue, JsValue> {
        let screen = self.with_inner(|inner| {
            inner.editor.scroll_y(y);
            inner.render()
        })?;
        Ok(to_js(&screen)?)
    }

    /// Current transform as `{ scale, scrollX, scrollY }`.
    #[wasm_bindgen(js_name = getTransform)]
    pub fn get_transform(&self) -> Result<JsValue, JsValue> {
        let transform = self.with_inner(|inner| Ok(inner.editor.viewport().transform()))?;
        Ok(to_js(&transform)?)
    }

    /// A copy of the scene data.
    #[wasm_bindgen(js_name = getData)]
    pub fn get_data(&self) -> Result<JsValue, JsValue> {
        let data = self.with_inner(|inner| Ok(inner.editor.get_data()))?;
        Ok(to_js(&data)?)
    }

    /// Replace the scene data and repaint.
    #[wasm_bindgen(js_name = setData)]
    pub fn set_data(&self, data: JsValue) -> Result<(), JsValue> {
        let data: Data = serde_wasm_bindgen::from_value(data).map_err(WebError::from)?;
        self.with_inner(|inner| {
            inner.editor.set_data(data);
            inner.painter.clear_images();
            inner.render().map(|_| ())
        })?;
        Ok(())
    }

    /// Scene data as a JSON string.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        Ok(self.with_inner(|inner| Ok(inner.editor.data().to_json()?))?)
    }

    /// Add an element in front of the others; returns its uuid.
    #[wasm_bindgen(js_name = addElement)]
    pub fn add_element(&self, element: JsValue) -> Result<String, JsValue> {
        let element: Element = serde_wasm_bindgen::from_value(element).map_err(WebError::from)?;
        Ok(self.with_inner(|inner| {
            let uuid = inner.editor.add_element(element);
            inner.render()?;
            Ok(uuid)
        })?)
    }

    #[wasm_bindgen(js_name = deleteElement)]
    pub fn delete_element(&self, uuid: &str) -> Result<(), JsValue> {
        self.with_inner(|inner| {
            inner.editor.delete_element(uuid)?;
            inner.render().map(|_| ())
        })?;
        Ok(())
    }

    /// Select the element at `index` (0 = front-most) and repaint.
    #[wasm_bindgen(js_name = selectElement)]
    pub fn select_element(&self, index: usize) -> Result<(), JsValue> {
        self.with_inner(|inner| {
            inner.editor.select_element(index)?;
            inner.render().map(|_| ())
        })?;
        Ok(())
    }

    #[wasm_bindgen(js_name = selectElementByUuid)]
    pub fn select_element_by_uuid(&self, uuid: &str) -> Result<(), JsValue> {
        self.with_inner(|inner| {
            inner.editor.select_element_by_uuid(uuid)?;
            inner.render().map(|_| ())
        })?;
        Ok(())
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) -> Result<(), JsValue> {
        self.with_inner(|inner| {
            inner.editor.clear_selection();
            inner.render().map(|_| ())
        })?;
        Ok(())
    }

    /// Uuid of the selected element, if any.
    #[wasm_bindgen(js_name = selectedUuid)]
    pub fn selected_uuid(&self) -> Result<Option<String>, JsValue> {
        Ok(self.with_inner(|inner| Ok(inner.editor.selected_uuid().map(str::to_string)))?)
    }

    /// Current interaction mode name.
    pub fn mode(&self) -> Result<JsValue, JsValue> {
        let mode = self.with_inner(|inner| Ok(inner.editor.mode()))?;
        Ok(to_js(&mode)?)
    }

    /// Subscribe to a board event (`point`, `moveStart`, `move`, `moveEnd`,
    /// `hover`, `leave`). The callback receives `{ x, y }` in board
    /// coordinates. Returns an id for [`Sketchboard::off`].
    pub fn on(&self, name: &str, callback: js_sys::Function) -> Result<u32, JsValue> {
        let kind: BoardEventKind = name.parse().map_err(WebError::from)?;
        let id = self.with_inner(|inner| {
            inner.board.on(kind, move |event: &BoardEvent| {
                let point = event.point();
                let payload = match to_js(&EventPayload { x: point.x, y: point.y }) {
                    Ok(payload) => payload,
                    Err(e) => {
                        log::error!("Failed to build {} payload: {}", kind, e);
                        return;
                    }
                };
                if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
                    log::error!("Listener for {} threw: {:?}", kind, e);
                }
            })
        })?;
        Ok(id.as_u32())
    }

    /// Remove a listener added with [`Sketchboard::on`].
    pub fn off(&self, name: &str, id: u32) -> Result<bool, JsValue> {
        let kind: BoardEventKind = name.parse().map_err(WebError::from)?;
        Ok(self.with_inner(|inner| inner.board.off(kind, ListenerId::from_u32(id)))?)
    }
}
