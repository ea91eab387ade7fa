//! In-memory storage implementation.

use super::{BoxFuture, SceneStorage, StorageError, StorageResult};
use crate::data::Data;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory scene storage for tests and the browser.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    scenes: RwLock<HashMap<String, Data>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl SceneStorage for MemoryStorage {
    fn save(&self, id: &str, data: &Data) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let data = data.clone();
        Box::pin(async move {
            self.scenes.write().map_err(lock_error)?.insert(id, data);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Data>> {
        let id = id.to_string();
        Box::pin(async move {
            let scenes = self.scenes.read().map_err(lock_error)?;
            scenes.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.scenes.write().map_err(lock_error)?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let scenes = self.scenes.read().map_err(lock_error)?;
            let mut ids: Vec<String> = scenes.keys().cloned().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.scenes.read().map_err(lock_error)?.contains_key(&id)) })
    }
}
