//! JSON-file storage adapter
//!
//! Persists each (scope, key) pair as one pretty-printed JSON document under
//! a data directory:
//!
//! ```text
//! <data_dir>/global/quickcmd.commands.json
//! <data_dir>/workspace/quickcmd.directories.json
//! ```
//!
//! Hosts with a per-project notion of "workspace" should point each project
//! at its own data directory (or supply their own adapter).

use super::{StorageAdapter, StorageScope};
use crate::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Adapter storing collections as JSON files.
#[derive(Debug, Clone)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Create a file-backed adapter rooted at `data_dir`, creating the scope
    /// subdirectories if needed.
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        for scope in [StorageScope::Global, StorageScope::Workspace] {
            let dir = data_dir.join(scope.as_str());
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
        }
        Ok(Self { data_dir })
    }

    /// Create an adapter rooted at the platform data directory.
    pub fn with_default_dir() -> Result<Self> {
        Self::new(default_data_dir())
    }

    fn key_path(&self, scope: StorageScope, key: &str) -> PathBuf {
        self.data_dir
            .join(scope.as_str())
            .join(format!("{}.json", key))
    }

    /// The directory this adapter reads and writes under.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

/// Default directory for registry data.
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "quickcmd")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            // Fallback to home directory if project dirs not available
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".quickcmd")
        })
}

#[async_trait]
impl StorageAdapter for FileStorage {
    async fn get(&self, scope: StorageScope, key: &str) -> Result<Option<serde_json::Value>> {
        let path = self.key_path(scope, key);
        if !path.exists() {
            return Ok(None);
        }

        let content = tokio::fs::read_to_string(&path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn put(&self, scope: StorageScope, key: &str, value: serde_json::Value) -> Result<()> {
        let path = self.key_path(scope, key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(&value)?;
        tokio::fs::write(&path, content).await?;

        Ok(())
    }
}
