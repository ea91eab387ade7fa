//! DOM input watcher.
//!
//! Listens for mouse and touch input on the display canvas, converts it to
//! board coordinates and emits board events. Listeners are removed when the
//! watcher is dropped.

use crate::error::WebResult;
use crate::options::client_to_board;
use kurbo::Point;
use sketchboard_core::events::{BoardEvent, EventEmitter, GestureTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Down,
    Move,
    Up,
    Leave,
}

const LISTENERS: [(&str, Input); 8] = [
    ("mousedown", Input::Down),
    ("mousemove", Input::Move),
    ("mouseup", Input::Up),
    ("mouseleave", Input::Leave),
    ("touchstart", Input::Down),
    ("touchmove", Input::Move),
    ("touchend", Input::Up),
    // A cancelled touch ends the gesture like leaving the canvas.
    ("touchcancel", Input::Leave),
];

/// Client position of a mouse or touch event.
fn client_point(event: &Event) -> Option<Point> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some(Point::new(mouse.client_x() as f64, mouse.client_y() as f64));
    }
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    // Ended touches are no longer in `touches`.
    let touch = touch_event
        .touches()
        .get(0)
        .or_else(|| touch_event.changed_touches().get(0))?;
    Some(Point::new(touch.client_x() as f64, touch.client_y() as f64))
}

fn dispatch(emitter: &RefCell<EventEmitter>, events: Vec<BoardEvent>) {
    for event in events {
        match emitter.try_borrow_mut() {
            Ok(mut emitter) => {
                emitter.emit(&event);
            }
            Err(_) => log::warn!("Dropping {} event: listeners are busy", event.kind()),
        }
    }
}

/// Pointer listener set attached to one canvas.
pub struct Watcher {
    canvas: HtmlCanvasElement,
    listeners: Vec<(&'static str, Closure<dyn FnMut(Event)>)>,
}

impl Watcher {
    pub fn new(canvas: &HtmlCanvasElement, emitter: Rc<RefCell<EventEmitter>>) -> WebResult<Self> {
        let tracker = Rc::new(RefCell::new(GestureTracker::new()));
        let mut watcher = Self {
            canvas: canvas.clone(),
            listeners: Vec::with_capacity(LISTENERS.len()),
        };

        for (name, input) in LISTENERS {
            let target = canvas.clone();
            let tracker = tracker.clone();
            let emitter = emitter.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if event.is_instance_of::<TouchEvent>() {
                    // No page scrolling and no emulated mouse events.
                    event.prevent_default();
                }
                let Some(client) = client_point(&event) else {
                    return;
                };
                let bounds = target.get_bounding_client_rect();
                let point = client_to_board(client, bounds.left(), bounds.top());
                let events = {
                    let mut tracker = tracker.borrow_mut();
                    match input {
                        Input::Down => tracker.pointer_down(point),
                        Input::Move => tracker.pointer_move(point),
                        Input::Up => tracker.pointer_up(point),
                        Input::Leave => tracker.pointer_leave(point),
                    }
                };
                dispatch(&emitter, events);
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            watcher.listeners.push((name, closure));
        }

        log::debug!("Watching {} input events", watcher.listeners.len());
        Ok(watcher)
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        for (name, closure) in self.listeners.drain(..) {
            if let Err(e) = self
                .canvas
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to remove {} listener: {:?}", name, e);
            }
        }
    }
}
