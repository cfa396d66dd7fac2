//! Command registry and organization engine for editor hosts.
//!
//! `quickcmd` stores, organizes, and re-runs frequently used shell and
//! editor commands: scoped collections (global vs. workspace), directory
//! trees, favorites, tags, placeholder templating, import/export, and a
//! bounded execution history. Presentation, persistence, and process
//! execution stay on the host side of three small traits.
//!
//! ## Usage
//!
//! ```no_run
//! use quickcmd::{CommandDraft, CommandKind, CommandRegistry, MemoryStorage, Scope};
//!
//! # async fn demo() -> quickcmd::Result<()> {
//! let registry = CommandRegistry::new(MemoryStorage::new());
//!
//! let command = registry
//!     .add_command(CommandDraft {
//!         name: Some("Commit".to_string()),
//!         command: "git commit -m [message]".to_string(),
//!         description: None,
//!         scope: Scope::Workspace,
//!         is_favorite: false,
//!         directory: None,
//!         tags: vec!["git".to_string()],
//!         kind: CommandKind::Shell,
//!     })
//!     .await?;
//!
//! assert_eq!(command.inputs.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod execution;
pub mod registry;
pub mod seed;
pub mod storage;
pub mod suggest;
pub mod template;
pub mod tree;

// Re-export commonly used types
pub use error::{Error, Result};
pub use execution::{parse_editor_invocation, CommandRunner, ExecutionOutcome, InputPrompter};
pub use registry::{
    CommandDirectory, CommandDraft, CommandKind, CommandPatch, CommandRegistry, DirectoryDraft,
    ExecutionRecord, QuickCommand, Scope,
};
pub use storage::{FileStorage, MemoryStorage, StorageAdapter, StorageScope};
pub use template::{extract_placeholders, substitute, Placeholder};
pub use tree::{build_scope_tree, TreeNode};

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of retained execution-history entries
pub const HISTORY_LIMIT: usize = 100;
