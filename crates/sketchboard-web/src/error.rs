//! Web shell errors.

use sketchboard_core::error::CoreError;
use sketchboard_render::RendererError;
use thiserror::Error;

/// Errors raised by the browser shell.
#[derive(Debug, Error)]
pub enum WebError {
    #[error("DOM error: {0}")]
    Dom(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The board is already handling an event or a draw.
    #[error("Board is busy")]
    Busy,
}

/// Result type for web shell operations.
pub type WebResult<T> = Result<T, WebError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for WebError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        WebError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for WebError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        WebError::Serialization(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<WebError> for wasm_bindgen::JsValue {
    fn from(e: WebError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}
