//! Storage adapter contract
//!
//! The registry never talks to a persistence engine directly. It reads and
//! writes whole collections through a [`StorageAdapter`], a scoped key-value
//! store supplied by the host:
//! - the `Global` scope lives for the whole installation
//! - the `Workspace` scope lives for the current project
//!
//! Every mutation is a full-collection read-modify-write under one key, so
//! the consistency unit is "one collection under one key". There is no
//! row-level update primitive by design.

pub mod file;
pub mod memory;

pub use file::{default_data_dir, FileStorage};
pub use memory::MemoryStorage;

use crate::error::Result;
use async_trait::async_trait;

/// Which of the two host-provided stores a key lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageScope {
    Global,
    Workspace,
}

impl StorageScope {
    /// Stable name used in storage paths and log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageScope::Global => "global",
            StorageScope::Workspace => "workspace",
        }
    }
}

/// Storage key for command collections (one per scope).
pub const COMMANDS_KEY: &str = "quickcmd.commands";
/// Storage key for directory collections (one per scope).
pub const DIRECTORIES_KEY: &str = "quickcmd.directories";
/// Storage key for execution history (Global scope only).
pub const HISTORY_KEY: &str = "quickcmd.history";

/// Host-provided persistence for the registry's collections.
///
/// `get` returns `None` for a key that has never been written; callers treat
/// that as the empty collection. `put` persists the full value for the key.
#[async_trait]
pub trait StorageAdapter: Send + Sync {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<serde_json::Value>>;

    async fn put(&self, scope: StorageScope, key: &str, value: serde_json::Value) -> Result<()>;
}
