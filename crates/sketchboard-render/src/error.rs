//! Renderer errors.

use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Draw failed: {0}")]
    DrawFailed(String),
    #[error("Resource error: {0}")]
    Resource(String),
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;
