//! Sketchboard Web
//!
//! The browser shell: mounts the board canvases, turns DOM pointer and touch
//! input into board events, paints through `CanvasRenderingContext2d` and
//! exposes the [`Sketchboard`] widget to JavaScript.

mod error;
mod options;

pub use error::{WebError, WebResult};
pub use options::{WidgetOptions, device_pixels};

#[cfg(target_arch = "wasm32")]
mod board;
#[cfg(target_arch = "wasm32")]
mod canvas_painter;
#[cfg(target_arch = "wasm32")]
mod watcher;
#[cfg(target_arch = "wasm32")]
mod widget;

#[cfg(target_arch = "wasm32")]
pub use board::Board;
#[cfg(target_arch = "wasm32")]
pub use canvas_painter::CanvasPainter;
#[cfg(target_arch = "wasm32")]
pub use watcher::Watcher;
#[cfg(target_arch = "wasm32")]
pub use widget::Sketchboard;

/// Install the panic hook and console logger when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }
    log::info!("Sketchboard loaded");
}
