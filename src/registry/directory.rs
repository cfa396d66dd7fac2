//! Directory management
//!
//! Directories give commands a hierarchy without owning them: a command
//! points at its directory by path string, and a directory's position in the
//! tree is derived from its own path (see [`super::path`]). Deleting a
//! directory cascade-deletes the commands whose `directory` exactly equals
//! its path. It does not recurse: sub-directories (and their commands)
//! survive as orphans and must be deleted individually.

use super::path;
use super::{CommandRegistry, Scope};
use crate::error::{Error, Result};
use crate::storage::{StorageAdapter, DIRECTORIES_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A command directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDirectory {
    pub id: String,
    pub name: String,
    /// Full path, e.g. `"aws/ec2"`; parentage is derived from it.
    pub path: String,
    #[serde(rename = "category")]
    pub scope: Scope,
    /// UI-persisted expansion state.
    pub is_expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields a caller supplies when creating a directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryDraft {
    pub name: String,
    pub path: String,
    #[serde(rename = "category")]
    pub scope: Scope,
    #[serde(default)]
    pub is_expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl<S: StorageAdapter> CommandRegistry<S> {
    pub(crate) async fn load_directories(&self, scope: Scope) -> Result<Vec<CommandDirectory>> {
        match self.storage().get(scope.storage(), DIRECTORIES_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) async fn save_directories(
        &self,
        scope: Scope,
        directories: &[CommandDirectory],
    ) -> Result<()> {
        self.storage()
            .put(
                scope.storage(),
                DIRECTORIES_KEY,
                serde_json::to_value(directories)?,
            )
            .await
    }

    /// Every directory, global scope first, each scope in insertion order.
    pub async fn all_directories(&self) -> Result<Vec<CommandDirectory>> {
        let mut directories = self.load_directories(Scope::Global).await?;
        directories.extend(self.load_directories(Scope::Workspace).await?);
        Ok(directories)
    }

    /// Directories of one scope, in insertion order.
    pub async fn directories_in_scope(&self, scope: Scope) -> Result<Vec<CommandDirectory>> {
        self.load_directories(scope).await
    }

    /// Root-level directories of a scope (single-segment paths).
    pub async fn root_directories(&self, scope: Scope) -> Result<Vec<CommandDirectory>> {
        Ok(self
            .load_directories(scope)
            .await?
            .into_iter()
            .filter(|dir| path::is_root(&dir.path))
            .collect())
    }

    /// Direct children of `parent` within a scope: paths one segment deeper
    /// that extend `parent + "/"`. Descendants further down do not qualify.
    pub async fn child_directories(
        &self,
        scope: Scope,
        parent: &str,
    ) -> Result<Vec<CommandDirectory>> {
        Ok(self
            .load_directories(scope)
            .await?
            .into_iter()
            .filter(|dir| path::is_direct_child(parent, &dir.path))
            .collect())
    }

    /// Create a directory from a draft.
    ///
    /// No uniqueness check on `path` is performed; two directories may share
    /// a path, and path-based operations then apply to all of them.
    pub async fn add_directory(&self, draft: DirectoryDraft) -> Result<CommandDirectory> {
        let directory = CommandDirectory {
            id: super::generate_id(),
            name: draft.name,
            path: draft.path,
            scope: draft.scope,
            is_expanded: draft.is_expanded,
            description: draft.description,
            icon: draft.icon,
            created_at: Utc::now(),
        };

        let mut directories = self.load_directories(directory.scope).await?;
        directories.push(directory.clone());
        self.save_directories(directory.scope, &directories).await?;

        tracing::debug!(id = %directory.id, path = %directory.path, "added directory");
        Ok(directory)
    }

    /// Delete a directory and cascade-delete its directly-contained commands.
    ///
    /// "Directly contained" means `command.directory == directory.path`,
    /// exactly. Commands of sub-directories are untouched.
    pub async fn delete_directory(&self, id: &str) -> Result<()> {
        let directory = self
            .all_directories()
            .await?
            .into_iter()
            .find(|dir| dir.id == id)
            .ok_or_else(|| Error::directory_not_found(id))?;

        let contained: Vec<String> = self
            .all_commands()
            .await?
            .into_iter()
            .filter(|cmd| cmd.directory.as_deref() == Some(directory.path.as_str()))
            .map(|cmd| cmd.id)
            .collect();

        for command_id in &contained {
            self.delete_command(command_id).await?;
        }

        let mut deleted = false;
        for scope in [Scope::Global, Scope::Workspace] {
            let directories = self.load_directories(scope).await?;
            let before = directories.len();
            let remaining: Vec<CommandDirectory> =
                directories.into_iter().filter(|dir| dir.id != id).collect();

            if remaining.len() != before {
                self.save_directories(scope, &remaining).await?;
                deleted = true;
            }
        }

        if deleted {
            tracing::debug!(
                id,
                path = %directory.path,
                commands = contained.len(),
                "deleted directory"
            );
            Ok(())
        } else {
            Err(Error::directory_not_found(id))
        }
    }

    /// Flip the persisted expansion state of a directory.
    pub async fn toggle_expansion(&self, id: &str) -> Result<()> {
        let mut toggled = false;

        for scope in [Scope::Global, Scope::Workspace] {
            let mut directories = self.load_directories(scope).await?;
            if let Some(directory) = directories.iter_mut().find(|dir| dir.id == id) {
                directory.is_expanded = !directory.is_expanded;
                self.save_directories(scope, &directories).await?;
                toggled = true;
            }
        }

        if toggled {
            Ok(())
        } else {
            Err(Error::directory_not_found(id))
        }
    }
}
