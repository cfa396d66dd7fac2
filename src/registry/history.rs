//! Execution history
//!
//! A bounded, newest-first log of past executions, kept in the Global scope
//! regardless of where the executed command lives. Entries snapshot the
//! command's name and text so the log stays meaningful after a rename or
//! delete; `command_id` is a weak reference that may no longer resolve.

use super::{CommandRegistry, QuickCommand, Scope};
use crate::error::Result;
use crate::storage::{StorageAdapter, HISTORY_KEY};
use crate::HISTORY_LIMIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionRecord {
    pub id: String,
    /// Weak reference; the command may since have been deleted.
    pub command_id: String,
    /// Display name at execution time.
    pub command_name: String,
    /// Command text at execution time.
    pub command: String,
    pub executed_at: DateTime<Utc>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl<S: StorageAdapter> CommandRegistry<S> {
    async fn load_history(&self) -> Result<Vec<ExecutionRecord>> {
        match self
            .storage()
            .get(Scope::Global.storage(), HISTORY_KEY)
            .await?
        {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_history(&self, history: &[ExecutionRecord]) -> Result<()> {
        self.storage()
            .put(
                Scope::Global.storage(),
                HISTORY_KEY,
                serde_json::to_value(history)?,
            )
            .await
    }

    /// The execution log, newest first, at most [`HISTORY_LIMIT`] entries.
    pub async fn execution_history(&self) -> Result<Vec<ExecutionRecord>> {
        self.load_history().await
    }

    /// Prepend one record, evicting the oldest entries past the cap.
    pub(crate) async fn record_execution(
        &self,
        command: &QuickCommand,
        success: bool,
        duration_ms: Option<u64>,
    ) -> Result<ExecutionRecord> {
        let record = ExecutionRecord {
            id: super::generate_id(),
            command_id: command.id.clone(),
            command_name: command.display_name().to_string(),
            command: command.command.clone(),
            executed_at: Utc::now(),
            success,
            duration_ms,
        };

        let mut history = self.load_history().await?;
        history.insert(0, record.clone());
        history.truncate(HISTORY_LIMIT);
        self.save_history(&history).await?;

        Ok(record)
    }
}
