//! Error types for core operations.

use thiserror::Error;

/// Core errors.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid scene data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Element not found: {0}")]
    ElementNotFound(String),
    #[error("Element index out of range: {index} (scene has {len} elements)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid option: {0}")]
    InvalidOption(String),
    #[error("Selection is disabled while painting")]
    Painting,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
