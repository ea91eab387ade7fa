//! Editor state machine: selection, dragging and resizing driven by board
//! events.

use crate::config::Config;
use crate::context::{BoardOptions, Context};
use crate::data::Data;
use crate::element::{Element, ElementId};
use crate::error::{CoreError, CoreResult};
use crate::events::BoardEvent;
use crate::helper::{DotPosition, Helper, HelperConfig, HelperUpdateOptions};
use crate::hit::is_point_in_element;
use crate::manipulate::{drag_element, transform_element};
use crate::viewport::{ScreenContext, Viewport};
use kurbo::{Point, Rect};
use serde::Serialize;

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Idle.
    #[default]
    Null,
    /// An element was pressed; moves drag it.
    SelectElement,
    /// A wrapper dot was pressed; moves resize the element.
    SelectElementWrapperDot,
    /// The host is painting; pointer input does not select or drag.
    Painting,
}

/// What an input event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The board needs repainting.
    pub redraw: bool,
    /// Scene data was modified.
    pub data_changed: bool,
}

impl EventOutcome {
    fn redraw() -> Self {
        Self {
            redraw: true,
            data_changed: false,
        }
    }

    fn changed() -> Self {
        Self {
            redraw: true,
            data_changed: true,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawFrame<'a> {
    pub data: &'a Data,
    pub helper: &'a HelperConfig,
    pub context: &'a Context,
    /// Visible part of the content, for culling. `None` when nothing is shown.
    pub visible: Option<Rect>,
}

/// Scene, viewport and selection state of one board.
#[derive(Debug, Clone)]
pub struct Editor {
    data: Data,
    viewport: Viewport,
    helper: Helper,
    config: Config,
    mode: Mode,
    selected_uuid: Option<ElementId>,
    selected_dot: Option<DotPosition>,
    prev_point: Option<Point>,
}

impl Editor {
    pub fn new(options: BoardOptions, config: Config) -> CoreResult<Self> {
        Ok(Self {
            data: Data::new(),
            viewport: Viewport::new(options)?,
            helper: Helper::new(&config),
            config,
            mode: Mode::Null,
            selected_uuid: None,
            selected_dot: None,
            prev_point: None,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn selected_uuid(&self) -> Option<&str> {
        self.selected_uuid.as_deref()
    }

    pub fn selected_dot(&self) -> Option<DotPosition> {
        self.selected_dot
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn set_config(&mut self, config: Config) {
        self.helper.set_config(&config);
        self.config = config;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn context(&self) -> &Context {
        self.viewport.context()
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn helper(&self) -> &Helper {
        &self.helper
    }

    // --- Viewport ---

    pub fn scale(&mut self, ratio: f64) -> ScreenContext {
        self.viewport.scale(ratio)
    }

    pub fn scroll_x(&mut self, x: f64) -> ScreenContext {
        self.viewport.scroll_x(x)
    }

    pub fn scroll_y(&mut self, y: f64) -> ScreenContext {
        self.viewport.scroll_y(y)
    }

    pub fn screen(&mut self) -> ScreenContext {
        self.viewport.calculate_screen()
    }

    // --- Data ---

    /// Deep copy of the scene.
    pub fn get_data(&self) -> Data {
        self.data.clone()
    }

    /// Replace the scene. A selection that no longer exists is dropped.
    pub fn set_data(&mut self, data: Data) -> &Data {
        self.data = data.init();
        if let Some(uuid) = &self.selected_uuid {
            if self.data.get(uuid).is_none() {
                log::debug!("Dropping stale selection {}", uuid);
                self.reset_interaction();
                self.selected_uuid = None;
            }
        }
        &self.data
    }

    /// Add an element in front of all others and return its uuid.
    pub fn add_element(&mut self, elem: Element) -> ElementId {
        self.data.add_element(elem)
    }

    /// Replace an element, keeping its z-position.
    pub fn update_element(&mut self, elem: Element) -> CoreResult<()> {
        self.data.update_element(elem)
    }

    /// Delete an element, clearing the selection if it was selected.
    pub fn delete_element(&mut self, uuid: &str) -> CoreResult<Element> {
        let elem = self.data.delete_element(uuid)?;
        if self.selected_uuid.as_deref() == Some(uuid) {
            self.clear_selection();
        }
        Ok(elem)
    }

    // --- Selection ---

    /// Select the element at `index` in z-order (0 = front-most).
    pub fn select_element(&mut self, index: usize) -> CoreResult<()> {
        let uuid = self
            .data
            .elements
            .get(index)
            .map(|e| e.uuid.clone())
            .ok_or(CoreError::IndexOutOfRange {
                index,
                len: self.data.len(),
            })?;
        self.select(uuid)
    }

    pub fn select_element_by_uuid(&mut self, uuid: &str) -> CoreResult<()> {
        if self.data.get(uuid).is_none() {
            return Err(CoreError::ElementNotFound(uuid.to_string()));
        }
        self.select(uuid.to_string())
    }

    /// Programmatic selection ends any pointer interaction in progress.
    fn select(&mut self, uuid: ElementId) -> CoreResult<()> {
        if self.mode == Mode::Painting {
            return Err(CoreError::Painting);
        }
        self.reset_interaction();
        self.selected_uuid = Some(uuid);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected_uuid = None;
        self.reset_interaction();
    }

    /// Enter painting mode; selection and dragging are suspended.
    pub fn begin_painting(&mut self) {
        self.clear_selection();
        self.mode = Mode::Painting;
    }

    pub fn end_painting(&mut self) {
        if self.mode == Mode::Painting {
            self.mode = Mode::Null;
        }
    }

    fn reset_interaction(&mut self) {
        if self.mode != Mode::Painting {
            self.mode = Mode::Null;
        }
        self.selected_dot = None;
        self.prev_point = None;
    }

    // --- Drawing ---

    /// Refresh the helper for the current selection and return the frame to
    /// paint.
    pub fn draw(&mut self) -> DrawFrame<'_> {
        let opts = HelperUpdateOptions {
            selected_uuid: self.selected_uuid.clone(),
            device_pixel_ratio: self.viewport.options().device_pixel_ratio,
            scale: self.viewport.transform().scale,
        };
        let helper = self.helper.update_config(&self.data, opts);
        DrawFrame {
            data: &self.data,
            helper,
            context: self.viewport.context(),
            visible: self.viewport.visible_content_rect(),
        }
    }

    // --- Events ---

    /// Route a board event to its handler.
    pub fn handle_event(&mut self, event: &BoardEvent) -> EventOutcome {
        match *event {
            BoardEvent::Point(p) => self.handle_point(p),
            BoardEvent::MoveStart(p) => self.handle_move_start(p),
            BoardEvent::Move(p) => self.handle_move(p),
            BoardEvent::MoveEnd(p) => self.handle_move_end(p),
            BoardEvent::Hover(_) | BoardEvent::Leave(_) => EventOutcome::default(),
        }
    }

    /// Pointer pressed: pick a wrapper dot of the selected element, or select
    /// the element under the pointer, or clear the selection.
    pub fn handle_point(&mut self, point: Point) -> EventOutcome {
        if self.mode == Mode::Painting {
            return EventOutcome::default();
        }

        // The view may have changed since the last draw.
        self.helper.update_config(
            &self.data,
            HelperUpdateOptions {
                selected_uuid: self.selected_uuid.clone(),
                device_pixel_ratio: self.viewport.options().device_pixel_ratio,
                scale: self.viewport.transform().scale,
            },
        );
        if let Some((uuid, position)) = self.helper.is_point_in_element_wrapper_dot(point, self.viewport.context()) {
            if self.selected_uuid.as_deref() == Some(uuid.as_str()) {
                log::debug!("Selected dot {} of {}", position.as_str(), uuid);
                self.mode = Mode::SelectElementWrapperDot;
                self.selected_dot = Some(position);
                return EventOutcome::default();
            }
        }

        match is_point_in_element(point, &self.data, self.viewport.context()) {
            Some((index, uuid)) => {
                log::debug!("Selected element {} at index {}", uuid, index);
                self.mode = Mode::SelectElement;
                self.selected_dot = None;
                self.selected_uuid = Some(uuid);
                EventOutcome::redraw()
            }
            None => {
                let had_selection = self.selected_uuid.is_some();
                self.clear_selection();
                if had_selection {
                    EventOutcome::redraw()
                } else {
                    EventOutcome::default()
                }
            }
        }
    }

    pub fn handle_move_start(&mut self, point: Point) -> EventOutcome {
        self.prev_point = Some(point);
        EventOutcome::default()
    }

    /// Pointer moved while pressed: drag or resize the selected element.
    pub fn handle_move(&mut self, point: Point) -> EventOutcome {
        let prev = self.prev_point.replace(point);
        let (Some(prev), Some(uuid)) = (prev, self.selected_uuid.clone()) else {
            return EventOutcome::default();
        };
        let scale = self.viewport.transform().scale;

        let result = match (self.mode, self.selected_dot) {
            (Mode::SelectElement, _) => drag_element(&mut self.data, &uuid, point, prev, scale),
            (Mode::SelectElementWrapperDot, Some(dot)) => {
                transform_element(&mut self.data, &uuid, dot, point, prev, scale)
            }
            _ => return EventOutcome::default(),
        };

        match result {
            Ok(()) => EventOutcome::changed(),
            Err(e) => {
                log::warn!("Ignoring move: {}", e);
                EventOutcome::default()
            }
        }
    }

    /// Pointer released. The selection stays so its wrapper remains visible.
    pub fn handle_move_end(&mut self, _point: Point) -> EventOutcome {
        let was_active = matches!(self.mode, Mode::SelectElement | Mode::SelectElementWrapperDot);
        self.reset_interaction();
        if was_active {
            EventOutcome::redraw()
        } else {
            EventOutcome::default()
        }
    }
}
