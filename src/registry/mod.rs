//! Command registry
//!
//! This module owns the three collections at the heart of the crate:
//! - Commands, per scope (global / workspace)
//! - Directories organizing commands into a tree, per scope
//! - Execution history (global, bounded)
//!
//! It provides CRUD, search, favorites, hierarchical queries, cascading
//! delete, import/export, and history recording. All persistence goes
//! through the injected [`StorageAdapter`]; the registry holds no global
//! state, so tests build isolated instances freely.

pub mod directory;
pub mod history;
pub mod path;
pub mod transfer;


pub use directory::{CommandDirectory, DirectoryDraft};
pub use history::ExecutionRecord;

use crate::error::{Error, Result};
use crate::storage::{StorageAdapter, StorageScope, COMMANDS_KEY};
use crate::template::{self, Placeholder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a command or directory lives: across every project, or only in the
/// current one.
///
/// Serialized as `"global"` / `"repository"` under the field name `category`,
/// which is the on-disk and export vocabulary this format has always used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    #[serde(rename = "global")]
    Global,
    #[serde(rename = "repository")]
    Workspace,
}

impl Scope {
    pub(crate) fn storage(self) -> StorageScope {
        match self {
            Scope::Global => StorageScope::Global,
            Scope::Workspace => StorageScope::Workspace,
        }
    }
}

/// How a command's text is interpreted at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    /// Sent verbatim to a terminal-like sink.
    #[default]
    Shell,
    /// An editor command identifier, optionally followed by space-separated
    /// arguments parsed as JSON with string fallback.
    Editor,
}

/// A stored command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickCommand {
    pub id: String,
    /// Display label; the raw command text stands in when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The literal text to execute, with zero or more `[label]` placeholders.
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "category")]
    pub scope: Scope,
    pub is_favorite: bool,
    /// Derived from `command` on every save; never edited independently.
    pub inputs: Vec<Placeholder>,
    /// `/`-delimited containing directory path; `None` means root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub execution_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_executed_at: Option<DateTime<Utc>>,
    #[serde(rename = "commandType", default)]
    pub kind: CommandKind,
}

impl QuickCommand {
    /// The label a host should render: the name when set, the command text
    /// otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.command)
    }
}

/// Fields a caller supplies when creating a command. Identity, timestamps,
/// inputs, and the execution counter are the registry's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "category")]
    pub scope: Scope,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "commandType", default)]
    pub kind: CommandKind,
}

/// Partial update for [`CommandRegistry::update_command`].
///
/// `None` leaves a field untouched. The double-`Option` fields distinguish
/// "leave alone" (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CommandPatch {
    pub name: Option<Option<String>>,
    pub command: Option<String>,
    pub description: Option<Option<String>>,
    pub is_favorite: Option<bool>,
    pub directory: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub kind: Option<CommandKind>,
    pub execution_count: Option<u64>,
    pub last_executed_at: Option<DateTime<Utc>>,
}

impl CommandPatch {
    fn apply(&self, command: &mut QuickCommand) {
        if let Some(name) = &self.name {
            command.name = name.clone();
        }
        if let Some(text) = &self.command {
            if *text != command.command {
                command.command = text.clone();
                // Inputs always mirror the placeholders of the saved text.
                command.inputs = template::extract_placeholders(&command.command);
            }
        }
        if let Some(description) = &self.description {
            command.description = description.clone();
        }
        if let Some(is_favorite) = self.is_favorite {
            command.is_favorite = is_favorite;
        }
        if let Some(directory) = &self.directory {
            command.directory = directory.clone();
        }
        if let Some(tags) = &self.tags {
            command.tags = tags.clone();
        }
        if let Some(kind) = self.kind {
            command.kind = kind;
        }
        if let Some(execution_count) = self.execution_count {
            command.execution_count = execution_count;
        }
        if let Some(last_executed_at) = self.last_executed_at {
            command.last_executed_at = Some(last_executed_at);
        }
        command.updated_at = Utc::now();
    }
}

pub(crate) fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// The registry. One instance per host (or per test), parameterized over the
/// storage adapter the host supplies.
#[derive(Debug)]
pub struct CommandRegistry<S> {
    storage: S,
}

impl<S: StorageAdapter> CommandRegistry<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The adapter this registry persists through.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub(crate) async fn load_commands(&self, scope: Scope) -> Result<Vec<QuickCommand>> {
        match self.storage.get(scope.storage(), COMMANDS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) async fn save_commands(
        &self,
        scope: Scope,
        commands: &[QuickCommand],
    ) -> Result<()> {
        self.storage
            .put(
                scope.storage(),
                COMMANDS_KEY,
                serde_json::to_value(commands)?,
            )
            .await
    }

    // === Queries ===

    /// Every command, global scope first, each scope in insertion order.
    pub async fn all_commands(&self) -> Result<Vec<QuickCommand>> {
        let mut commands = self.load_commands(Scope::Global).await?;
        commands.extend(self.load_commands(Scope::Workspace).await?);
        Ok(commands)
    }

    /// Commands of one scope, in insertion order.
    pub async fn commands_in_scope(&self, scope: Scope) -> Result<Vec<QuickCommand>> {
        self.load_commands(scope).await
    }

    /// Commands of one scope inside one directory; `None` selects the
    /// root-level commands of that scope.
    pub async fn commands_in_directory(
        &self,
        scope: Scope,
        directory: Option<&str>,
    ) -> Result<Vec<QuickCommand>> {
        let commands = self.load_commands(scope).await?;
        Ok(commands
            .into_iter()
            .filter(|cmd| cmd.directory.as_deref() == directory)
            .collect())
    }

    /// Favorite commands across both scopes.
    pub async fn favorites(&self) -> Result<Vec<QuickCommand>> {
        Ok(self
            .all_commands()
            .await?
            .into_iter()
            .filter(|cmd| cmd.is_favorite)
            .collect())
    }

    /// Case-insensitive substring search over name, command text,
    /// description, and tags. A match on any one field qualifies.
    pub async fn search(&self, query: &str) -> Result<Vec<QuickCommand>> {
        let needle = query.to_lowercase();
        Ok(self
            .all_commands()
            .await?
            .into_iter()
            .filter(|cmd| {
                cmd.name
                    .as_deref()
                    .is_some_and(|name| name.to_lowercase().contains(&needle))
                    || cmd.command.to_lowercase().contains(&needle)
                    || cmd
                        .description
                        .as_deref()
                        .is_some_and(|desc| desc.to_lowercase().contains(&needle))
                    || cmd
                        .tags
                        .iter()
                        .any(|tag| tag.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Look a command up by id across both scopes.
    pub async fn find_command(&self, id: &str) -> Result<Option<QuickCommand>> {
        Ok(self
            .all_commands()
            .await?
            .into_iter()
            .find(|cmd| cmd.id == id))
    }

    // === Mutations ===

    /// Create a command from a draft: derive its inputs, assign identity and
    /// timestamps, append it to its scope's collection.
    pub async fn add_command(&self, draft: CommandDraft) -> Result<QuickCommand> {
        let now = Utc::now();
        let command = QuickCommand {
            id: generate_id(),
            inputs: template::extract_placeholders(&draft.command),
            name: draft.name,
            command: draft.command,
            description: draft.description,
            scope: draft.scope,
            is_favorite: draft.is_favorite,
            directory: draft.directory,
            tags: draft.tags,
            execution_count: 0,
            created_at: now,
            updated_at: now,
            last_executed_at: None,
            kind: draft.kind,
        };

        let mut commands = self.load_commands(command.scope).await?;
        commands.push(command.clone());
        self.save_commands(command.scope, &commands).await?;

        tracing::debug!(id = %command.id, scope = ?command.scope, "added command");
        Ok(command)
    }

    /// Merge `patch` into the command with this id, wherever it lives.
    ///
    /// Ids are unique across scopes; the collection that contains the id is
    /// the one that gets rewritten. Fails with [`Error::CommandNotFound`]
    /// when neither scope has it.
    pub async fn update_command(&self, id: &str, patch: CommandPatch) -> Result<()> {
        let mut updated = false;

        for scope in [Scope::Global, Scope::Workspace] {
            let mut commands = self.load_commands(scope).await?;
            if let Some(command) = commands.iter_mut().find(|cmd| cmd.id == id) {
                patch.apply(command);
                self.save_commands(scope, &commands).await?;
                updated = true;
            }
        }

        if updated {
            Ok(())
        } else {
            Err(Error::command_not_found(id))
        }
    }

    /// Remove the command with this id from whichever scope contains it.
    pub async fn delete_command(&self, id: &str) -> Result<()> {
        let mut deleted = false;

        for scope in [Scope::Global, Scope::Workspace] {
            let commands = self.load_commands(scope).await?;
            let before = commands.len();
            let remaining: Vec<QuickCommand> =
                commands.into_iter().filter(|cmd| cmd.id != id).collect();

            if remaining.len() != before {
                self.save_commands(scope, &remaining).await?;
                deleted = true;
            }
        }

        if deleted {
            tracing::debug!(id, "deleted command");
            Ok(())
        } else {
            Err(Error::command_not_found(id))
        }
    }

    /// Flip the favorite flag of the command with this id.
    pub async fn toggle_favorite(&self, id: &str) -> Result<()> {
        let command = self
            .find_command(id)
            .await?
            .ok_or_else(|| Error::command_not_found(id))?;

        self.update_command(
            id,
            CommandPatch {
                is_favorite: Some(!command.is_favorite),
                ..Default::default()
            },
        )
        .await
    }
}
