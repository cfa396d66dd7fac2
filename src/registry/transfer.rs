//! Snapshot export and import
//!
//! Snapshots are self-contained JSON documents carrying commands and
//! directories, either for one scope or for everything. Import is additive
//! and sanitizing: identities, timestamps, favorite flags, and execution
//! counters never survive the trip, and every imported record lands in the
//! scope the caller chose, not the one it was exported from.

use super::{CommandDraft, CommandKind, CommandRegistry, DirectoryDraft, Scope};
use crate::error::{Error, Result};
use crate::storage::StorageAdapter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    version: &'static str,
    exported_at: DateTime<Utc>,
    commands: Vec<super::QuickCommand>,
    directories: Vec<super::CommandDirectory>,
}

/// Incoming snapshot. Identity and bookkeeping fields are not read at all;
/// that is what "stripping" them means here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingSnapshot {
    #[serde(default)]
    commands: Vec<IncomingCommand>,
    #[serde(default)]
    directories: Vec<IncomingDirectory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingCommand {
    #[serde(default)]
    name: Option<String>,
    command: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    directory: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(rename = "commandType", default)]
    kind: CommandKind,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingDirectory {
    name: String,
    path: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
}

impl<S: StorageAdapter> CommandRegistry<S> {
    /// Serialize commands and directories to a snapshot document.
    ///
    /// With a `scope` filter both collections are restricted to that scope;
    /// without one, everything is included.
    pub async fn export_snapshot(&self, scope: Option<Scope>) -> Result<String> {
        let (commands, directories) = match scope {
            Some(scope) => (
                self.commands_in_scope(scope).await?,
                self.directories_in_scope(scope).await?,
            ),
            None => (self.all_commands().await?, self.all_directories().await?),
        };

        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            exported_at: Utc::now(),
            commands,
            directories,
        };

        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Import a snapshot into `target_scope`.
    ///
    /// Directories come first so their commands have somewhere to point.
    /// Imported directories start collapsed; imported commands are never
    /// favorites and start with a zero execution count. Returns the number
    /// of commands imported (directories are not counted).
    ///
    /// A payload that does not parse fails with [`Error::Import`] before
    /// anything is added.
    pub async fn import_snapshot(&self, json: &str, target_scope: Scope) -> Result<usize> {
        let snapshot: IncomingSnapshot =
            serde_json::from_str(json).map_err(|e| Error::import(e.to_string()))?;

        for dir in snapshot.directories {
            self.add_directory(DirectoryDraft {
                name: dir.name,
                path: dir.path,
                scope: target_scope,
                is_expanded: false,
                description: dir.description,
                icon: dir.icon,
            })
            .await?;
        }

        let mut imported = 0;
        for cmd in snapshot.commands {
            self.add_command(CommandDraft {
                name: cmd.name,
                command: cmd.command,
                description: cmd.description,
                scope: target_scope,
                is_favorite: false,
                directory: cmd.directory,
                tags: cmd.tags,
                kind: cmd.kind,
            })
            .await?;
            imported += 1;
        }

        tracing::info!(count = imported, scope = ?target_scope, "imported snapshot");
        Ok(imported)
    }
}
