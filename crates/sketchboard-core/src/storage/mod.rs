//! Storage abstraction for scene persistence (JSON only).

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::data::Data;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Scene not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Trait for scene storage backends.
pub trait SceneStorage {
    /// Save a scene under `id`.
    fn save(&self, id: &str, data: &Data) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a scene.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Data>>;

    /// Delete a scene. Deleting a missing scene is not an error.
    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all scene ids.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a scene exists.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
