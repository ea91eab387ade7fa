//! Sketchboard Render Library
//!
//! Paints a scene through the [`Painter`] abstraction, a 2D-canvas-shaped
//! drawing surface. The browser crate implements it over
//! `CanvasRenderingContext2d`; [`RecordingPainter`] records draw commands for
//! tests and headless use.

mod calculator;
pub mod draw;
mod error;
mod painter;
mod recording;
mod renderer;
pub mod resource;

pub use calculator::is_element_in_view;
pub use draw::{DrawStatus, draw_element, draw_element_list, draw_element_wrapper};
pub use resource::{ResourceSource, element_image_url};
pub use error::{RenderResult, RendererError};
pub use painter::{Painter, TextBaseline, text_align_str};
pub use recording::{DrawCommand, RecordingPainter};
pub use renderer::{RenderStats, Renderer};
