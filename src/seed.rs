//! Demo data seeding
//!
//! Installs a small set of directories and commands so a first-run host has
//! something to render. Purely additive; calling it twice duplicates the
//! data, so hosts should gate it behind a first-run check.

use crate::error::Result;
use crate::registry::{CommandDraft, CommandKind, CommandRegistry, DirectoryDraft, Scope};
use crate::storage::StorageAdapter;

/// Seed demo directories and commands into an (ideally empty) registry.
pub async fn seed_demo_data<S: StorageAdapter>(registry: &CommandRegistry<S>) -> Result<()> {
    registry
        .add_directory(DirectoryDraft {
            name: "dev-tools".to_string(),
            path: "dev-tools".to_string(),
            scope: Scope::Workspace,
            is_expanded: true,
            description: Some("Day-to-day development commands".to_string()),
            icon: Some("tools".to_string()),
        })
        .await?;

    registry
        .add_directory(DirectoryDraft {
            name: "docker".to_string(),
            path: "docker".to_string(),
            scope: Scope::Workspace,
            is_expanded: true,
            description: Some("Container commands".to_string()),
            icon: Some("package".to_string()),
        })
        .await?;

    registry
        .add_directory(DirectoryDraft {
            name: "system".to_string(),
            path: "system".to_string(),
            scope: Scope::Global,
            is_expanded: false,
            description: Some("System inspection commands".to_string()),
            icon: Some("settings".to_string()),
        })
        .await?;

    let commands = [
        CommandDraft {
            name: Some("NPM Start".to_string()),
            command: "npm start".to_string(),
            description: Some("Start the development server".to_string()),
            scope: Scope::Workspace,
            is_favorite: true,
            directory: Some("dev-tools".to_string()),
            tags: vec!["npm".to_string(), "development".to_string()],
            kind: CommandKind::Shell,
        },
        CommandDraft {
            name: Some("NPM Test".to_string()),
            command: "npm test".to_string(),
            description: Some("Run the test suite".to_string()),
            scope: Scope::Workspace,
            is_favorite: false,
            directory: Some("dev-tools".to_string()),
            tags: vec!["npm".to_string(), "test".to_string()],
            kind: CommandKind::Shell,
        },
        CommandDraft {
            name: Some("Docker PS".to_string()),
            command: "docker ps".to_string(),
            description: Some("List running containers".to_string()),
            scope: Scope::Workspace,
            is_favorite: false,
            directory: Some("docker".to_string()),
            tags: vec!["docker".to_string()],
            kind: CommandKind::Shell,
        },
        CommandDraft {
            name: Some("Docker Build".to_string()),
            command: "docker build -t [tag] .".to_string(),
            description: Some("Build an image from the current directory".to_string()),
            scope: Scope::Workspace,
            is_favorite: false,
            directory: Some("docker".to_string()),
            tags: vec!["docker".to_string(), "build".to_string()],
            kind: CommandKind::Shell,
        },
        CommandDraft {
            name: Some("Disk Usage".to_string()),
            command: "df -h".to_string(),
            description: Some("Show free disk space".to_string()),
            scope: Scope::Global,
            is_favorite: false,
            directory: Some("system".to_string()),
            tags: vec!["system".to_string()],
            kind: CommandKind::Shell,
        },
        CommandDraft {
            name: Some("Git Status".to_string()),
            command: "git status".to_string(),
            description: Some("Show working tree status".to_string()),
            scope: Scope::Global,
            is_favorite: true,
            directory: None,
            tags: vec!["git".to_string()],
            kind: CommandKind::Shell,
        },
    ];

    for draft in commands {
        registry.add_command(draft).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_seeded_data_is_queryable() {
        let registry = CommandRegistry::new(MemoryStorage::new());
        seed_demo_data(&registry).await.unwrap();

        assert_eq!(registry.all_directories().await.unwrap().len(), 3);
        assert_eq!(registry.all_commands().await.unwrap().len(), 6);

        let favorites = registry.favorites().await.unwrap();
        assert_eq!(favorites.len(), 2);

        let docker = registry
            .commands_in_directory(Scope::Workspace, Some("docker"))
            .await
            .unwrap();
        assert_eq!(docker.len(), 2);

        // The parameterized demo command has its input derived.
        let build = docker
            .iter()
            .find(|cmd| cmd.command.starts_with("docker build"))
            .unwrap();
        assert_eq!(build.inputs.len(), 1);
        assert_eq!(build.inputs[0].label, "tag");
    }
}
