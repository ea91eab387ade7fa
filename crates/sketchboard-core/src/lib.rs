//! Sketchboard Core Library
//!
//! Platform-agnostic data structures and interaction logic for the Sketchboard
//! editor: the scene model, the viewport transform, hit-testing, the selection
//! wrapper and the pointer-driven editing state machine.

pub mod config;
pub mod context;
pub mod data;
pub mod editor;
pub mod element;
pub mod error;
pub mod events;
pub mod helper;
pub mod hit;
pub mod manipulate;
pub mod storage;
pub mod viewport;

pub use config::{Config, ElementWrapperConfig, PartialConfig, merge_config};
pub use context::{BoardOptions, Context, Transform, TransformPatch};
pub use data::Data;
pub use editor::{DrawFrame, Editor, EventOutcome, Mode};
pub use element::{Element, ElementDetail, ElementId, ElementType};
pub use error::{CoreError, CoreResult};
pub use events::{BoardEvent, BoardEventKind, EventEmitter, GestureTracker, ListenerId};
pub use helper::{DotPosition, ElementSizeController, ElementWrapper, Helper, HelperConfig, HelperUpdateOptions};
pub use hit::{element_bounds, is_point_in_element};
pub use manipulate::{MIN_ELEMENT_SIZE, drag_element, transform_element};
pub use viewport::{ScreenContext, ScreenPosition, ScreenSize, Viewport};
