//! In-memory storage adapter
//!
//! Backs the registry with a plain map. Used by tests and by hosts that
//! manage persistence themselves and only need a scratch registry.

use super::{StorageAdapter, StorageScope};
use crate::error::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Adapter holding every collection in process memory.
///
/// Each instance is fully isolated, so tests can build one registry per case
/// without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<(StorageScope, String), serde_json::Value>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageAdapter for MemoryStorage {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.entries.read().get(&(scope, key.to_string())).cloned())
    }

    async fn put(&self, scope: StorageScope, key: &str, value: serde_json::Value) -> Result<()> {
        self.entries
            .write()
            .insert((scope, key.to_string()), value);
        Ok(())
    }
}
