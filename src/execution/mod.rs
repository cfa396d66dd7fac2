//! Command execution
//!
//! This module handles:
//! - Collecting placeholder values through a host-supplied prompter
//! - Substituting them into the command text
//! - Handing the final string to a host-supplied runner
//! - Execution-count bookkeeping and history recording
//!
//! The registry never spawns processes or touches a terminal itself; both
//! ends of an execution are traits the host implements.

use crate::error::Result;
use crate::registry::{CommandKind, CommandPatch, CommandRegistry, QuickCommand};
use crate::storage::StorageAdapter;
use crate::template::{self, Placeholder};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::time::Instant;

/// Executes a finalized command string.
///
/// For [`CommandKind::Shell`] the text goes verbatim to a terminal-like
/// sink. For [`CommandKind::Editor`] the text is an editor command
/// invocation; [`parse_editor_invocation`] splits it the way hosts are
/// expected to.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str, kind: CommandKind) -> Result<()>;
}

/// Collects one value per placeholder.
///
/// Returning `None` signals cancellation and aborts the whole execution
/// with no side effects.
#[async_trait]
pub trait InputPrompter: Send + Sync {
    async fn prompt(&self, input: &Placeholder) -> Option<String>;
}

/// What happened when a command was executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The runner was invoked. `success` mirrors the history record; a
    /// runner failure surfaces here (once), never as an `Err`.
    Ran {
        success: bool,
        duration_ms: u64,
        error: Option<String>,
    },
    /// Input collection was cancelled. Nothing ran, nothing was recorded.
    Cancelled,
}

impl ExecutionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ExecutionOutcome::Ran { success: true, .. }
        )
    }
}

/// Split an editor invocation into its command identifier and arguments.
///
/// Each whitespace-separated argument is attempted as a JSON value and falls
/// back to a plain string, so `workbench.action.openSettings "editor"` and
/// `someCommand {"deep": true} 3` both do what they look like.
pub fn parse_editor_invocation(text: &str) -> (String, Vec<serde_json::Value>) {
    let mut parts = text.split_whitespace();
    let id = parts.next().unwrap_or_default().to_string();
    let args = parts
        .map(|arg| {
            serde_json::from_str(arg).unwrap_or_else(|_| serde_json::Value::String(arg.to_string()))
        })
        .collect();
    (id, args)
}

impl<S: StorageAdapter> CommandRegistry<S> {
    /// Execute a command end to end.
    ///
    /// Placeholder values are collected first; a cancelled prompt returns
    /// [`ExecutionOutcome::Cancelled`] before anything else happens. After
    /// the runner returns, a successful run bumps the execution counter and
    /// `last_executed_at`, and a history record is appended either way.
    /// Runner failures are logged and reported through the outcome; only
    /// storage failures propagate as errors.
    pub async fn execute(
        &self,
        command: &QuickCommand,
        prompter: &dyn InputPrompter,
        runner: &dyn CommandRunner,
    ) -> Result<ExecutionOutcome> {
        let mut values: HashMap<String, String> = HashMap::new();
        for input in &command.inputs {
            match prompter.prompt(input).await {
                Some(value) => {
                    values.insert(input.id.clone(), value);
                }
                None => return Ok(ExecutionOutcome::Cancelled),
            }
        }

        let final_command = if command.inputs.is_empty() {
            command.command.clone()
        } else {
            template::substitute(&command.command, &command.inputs, &values)
        };

        let started = Instant::now();
        let run_result = runner.run(&final_command, command.kind).await;

        let mut success = run_result.is_ok();
        let mut error = run_result.err().map(|e| e.to_string());

        if success {
            // Counter bookkeeping failing (e.g. the command was deleted
            // mid-execution) demotes the run to a recorded failure.
            let bump = self
                .update_command(
                    &command.id,
                    CommandPatch {
                        execution_count: Some(command.execution_count + 1),
                        last_executed_at: Some(Utc::now()),
                        ..Default::default()
                    },
                )
                .await;
            if let Err(e) = bump {
                success = false;
                error = Some(e.to_string());
            }
        }

        if let Some(message) = &error {
            tracing::error!(
                command = %command.display_name(),
                error = %message,
                "command execution failed"
            );
        }

        let duration_ms = started.elapsed().as_millis() as u64;
        self.record_execution(command, success, Some(duration_ms))
            .await?;

        Ok(ExecutionOutcome::Ran {
            success,
            duration_ms,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandDraft, Scope};
    use crate::storage::MemoryStorage;
    use parking_lot::Mutex;

    /// Runner that records what it was asked to run.
    struct RecordingRunner {
        calls: Mutex<Vec<(String, CommandKind)>>,
        fail_with: Option<String>,
    }

    impl RecordingRunner {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl CommandRunner for RecordingRunner {
        async fn run(&self, command: &str, kind: CommandKind) -> Result<()> {
            self.calls.lock().push((command.to_string(), kind));
            match &self.fail_with {
                Some(message) => Err(crate::error::Error::execution(message.clone())),
                None => Ok(()),
            }
        }
    }

    /// Prompter answering every input with `<label>-value`, or cancelling at
    /// a chosen label.
    struct ScriptedPrompter {
        cancel_on: Option<String>,
    }

    #[async_trait]
    impl InputPrompter for ScriptedPrompter {
        async fn prompt(&self, input: &Placeholder) -> Option<String> {
            if self.cancel_on.as_deref() == Some(input.label.as_str()) {
                return None;
            }
            Some(format!("{}-value", input.label))
        }
    }

    fn registry() -> CommandRegistry<MemoryStorage> {
        CommandRegistry::new(MemoryStorage::new())
    }

    fn draft(command: &str) -> CommandDraft {
        CommandDraft {
            name: None,
            command: command.to_string(),
            description: None,
            scope: Scope::Workspace,
            is_favorite: false,
            directory: None,
            tags: Vec::new(),
            kind: CommandKind::Shell,
        }
    }

    #[tokio::test]
    async fn test_execute_plain_command() {
        let registry = registry();
        let command = registry.add_command(draft("git status")).await.unwrap();

        let runner = RecordingRunner::ok();
        let prompter = ScriptedPrompter { cancel_on: None };
        let outcome = registry
            .execute(&command, &prompter, &runner)
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            runner.calls.lock().as_slice(),
            &[("git status".to_string(), CommandKind::Shell)]
        );

        let stored = registry.find_command(&command.id).await.unwrap().unwrap();
        assert_eq!(stored.execution_count, 1);
        assert!(stored.last_executed_at.is_some());

        let history = registry.execution_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(history[0].success);
        assert_eq!(history[0].command_id, command.id);
    }

    #[tokio::test]
    async fn test_execute_substitutes_prompted_values() {
        let registry = registry();
        let command = registry
            .add_command(draft("git commit -m [message]"))
            .await
            .unwrap();

        let runner = RecordingRunner::ok();
        let prompter = ScriptedPrompter { cancel_on: None };
        registry
            .execute(&command, &prompter, &runner)
            .await
            .unwrap();

        assert_eq!(
            runner.calls.lock()[0].0,
            "git commit -m message-value"
        );
    }

    #[tokio::test]
    async fn test_cancelled_prompt_has_no_side_effects() {
        let registry = registry();
        let command = registry
            .add_command(draft("ssh [host] -p [port]"))
            .await
            .unwrap();

        let runner = RecordingRunner::ok();
        let prompter = ScriptedPrompter {
            cancel_on: Some("port".to_string()),
        };
        let outcome = registry
            .execute(&command, &prompter, &runner)
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Cancelled);
        assert!(runner.calls.lock().is_empty());

        let stored = registry.find_command(&command.id).await.unwrap().unwrap();
        assert_eq!(stored.execution_count, 0);
        assert!(registry.execution_history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_runner_failure_is_recorded_not_raised() {
        let registry = registry();
        let command = registry.add_command(draft("make deploy")).await.unwrap();

        let runner = RecordingRunner::failing("terminal unavailable");
        let prompter = ScriptedPrompter { cancel_on: None };
        let outcome = registry
            .execute(&command, &prompter, &runner)
            .await
            .unwrap();

        match outcome {
            ExecutionOutcome::Ran {
                success, error, ..
            } => {
                assert!(!success);
                assert!(error.unwrap().contains("terminal unavailable"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        // Failed runs do not bump the counter but are logged in history.
        let stored = registry.find_command(&command.id).await.unwrap().unwrap();
        assert_eq!(stored.execution_count, 0);

        let history = registry.execution_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert!(!history[0].success);
    }

    #[tokio::test]
    async fn test_history_snapshot_survives_command_deletion() {
        let registry = registry();
        let command = registry
            .add_command(CommandDraft {
                name: Some("Deploy".to_string()),
                ..draft("make deploy")
            })
            .await
            .unwrap();

        let runner = RecordingRunner::ok();
        let prompter = ScriptedPrompter { cancel_on: None };
        registry
            .execute(&command, &prompter, &runner)
            .await
            .unwrap();
        registry.delete_command(&command.id).await.unwrap();

        let history = registry.execution_history().await.unwrap();
        assert_eq!(history[0].command_name, "Deploy");
        assert_eq!(history[0].command, "make deploy");
        assert!(registry
            .find_command(&history[0].command_id)
            .await
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_parse_editor_invocation() {
        let (id, args) = parse_editor_invocation("workbench.action.files.save");
        assert_eq!(id, "workbench.action.files.save");
        assert!(args.is_empty());

        let (id, args) = parse_editor_invocation(r#"editor.action.insert "text" 3 true"#);
        assert_eq!(id, "editor.action.insert");
        assert_eq!(
            args,
            vec![
                serde_json::json!("text"),
                serde_json::json!(3),
                serde_json::json!(true),
            ]
        );

        // Non-JSON arguments fall back to strings.
        let (_, args) = parse_editor_invocation("cmd plain-arg");
        assert_eq!(args, vec![serde_json::json!("plain-arg")]);
    }
}
