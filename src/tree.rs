//! Tree organization
//!
//! Builds the nested node structure presentation layers render: one category
//! per scope, directories nested by path depth, commands attached to their
//! directory (or the category root). Node variants are an explicit enum, so
//! consumers match exhaustively instead of sniffing properties.
//!
//! A directory whose immediate parent record is missing (the cascade-delete
//! limitation leaves such orphans behind) still shows up: it surfaces at the
//! category root instead of disappearing.

use crate::registry::{path, CommandDirectory, QuickCommand, Scope};
use serde::Serialize;

/// One node of the organized tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TreeNode {
    /// Scope root ("global" / "repository").
    #[serde(rename_all = "camelCase")]
    Category {
        scope: Scope,
        children: Vec<TreeNode>,
    },
    #[serde(rename_all = "camelCase")]
    Directory {
        directory: CommandDirectory,
        children: Vec<TreeNode>,
    },
    #[serde(rename_all = "camelCase")]
    Command { command: QuickCommand },
}

impl TreeNode {
    /// The label a host should render for this node.
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Category { scope, .. } => match scope {
                Scope::Global => "Global",
                Scope::Workspace => "Workspace",
            },
            TreeNode::Directory { directory, .. } => &directory.name,
            TreeNode::Command { command } => command.display_name(),
        }
    }
}

/// Organize one scope's directories and commands into a category node.
///
/// Directories nest by the direct-child rule of [`path`]; commands attach to
/// the directory whose path equals their `directory` field, root-level
/// commands to the category itself. Insertion order is preserved within each
/// level.
pub fn build_scope_tree(
    scope: Scope,
    directories: &[CommandDirectory],
    commands: &[QuickCommand],
) -> TreeNode {
    let directories: Vec<&CommandDirectory> =
        directories.iter().filter(|d| d.scope == scope).collect();
    let commands: Vec<&QuickCommand> = commands.iter().filter(|c| c.scope == scope).collect();

    let known_paths: Vec<&str> = directories.iter().map(|d| d.path.as_str()).collect();

    let mut children = Vec::new();
    for dir in &directories {
        if attaches_to_root(&dir.path, &known_paths) {
            children.push(build_directory_node(dir, &directories, &commands));
        }
    }
    for cmd in &commands {
        if cmd.directory.is_none() {
            children.push(TreeNode::Command {
                command: (*cmd).clone(),
            });
        }
    }

    TreeNode::Category { scope, children }
}

/// A directory sits at the category root when it is root-level, or when its
/// parent directory record is missing (orphan surfacing).
fn attaches_to_root(dir_path: &str, known_paths: &[&str]) -> bool {
    match path::parent(dir_path) {
        None => true,
        Some(parent) => !known_paths.contains(&parent),
    }
}

fn build_directory_node(
    dir: &CommandDirectory,
    directories: &[&CommandDirectory],
    commands: &[&QuickCommand],
) -> TreeNode {
    let mut children = Vec::new();

    for child in directories {
        if path::is_direct_child(&dir.path, &child.path) {
            children.push(build_directory_node(child, directories, commands));
        }
    }
    for cmd in commands {
        if cmd.directory.as_deref() == Some(dir.path.as_str()) {
            children.push(TreeNode::Command {
                command: (*cmd).clone(),
            });
        }
    }

    TreeNode::Directory {
        directory: dir.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandKind, DirectoryDraft};
    use crate::template;
    use chrono::Utc;

    fn directory(path_str: &str, scope: Scope) -> CommandDirectory {
        let draft = DirectoryDraft {
            name: path::name(path_str).to_string(),
            path: path_str.to_string(),
            scope,
            is_expanded: true,
            description: None,
            icon: None,
        };
        CommandDirectory {
            id: format!("dir-{}", path_str),
            name: draft.name,
            path: draft.path,
            scope: draft.scope,
            is_expanded: draft.is_expanded,
            description: draft.description,
            icon: draft.icon,
            created_at: Utc::now(),
        }
    }

    fn command(text: &str, directory: Option<&str>, scope: Scope) -> QuickCommand {
        let now = Utc::now();
        QuickCommand {
            id: format!("cmd-{}", text),
            name: None,
            command: text.to_string(),
            description: None,
            scope,
            is_favorite: false,
            inputs: template::extract_placeholders(text),
            directory: directory.map(String::from),
            tags: Vec::new(),
            execution_count: 0,
            created_at: now,
            updated_at: now,
            last_executed_at: None,
            kind: CommandKind::Shell,
        }
    }

    fn child_labels(node: &TreeNode) -> Vec<String> {
        match node {
            TreeNode::Category { children, .. } | TreeNode::Directory { children, .. } => {
                children.iter().map(|c| c.label().to_string()).collect()
            }
            TreeNode::Command { .. } => Vec::new(),
        }
    }

    #[test]
    fn test_nests_direct_children_only() {
        let dirs = vec![
            directory("aws", Scope::Global),
            directory("aws/ec2", Scope::Global),
            directory("aws/ec2/prod", Scope::Global),
            directory("tools", Scope::Global),
        ];
        let cmds = vec![
            command("aws s3 ls", Some("aws"), Scope::Global),
            command("top", None, Scope::Global),
        ];

        let root = build_scope_tree(Scope::Global, &dirs, &cmds);
        assert_eq!(child_labels(&root), vec!["aws", "tools", "top"]);

        let aws = match &root {
            TreeNode::Category { children, .. } => &children[0],
            _ => unreachable!(),
        };
        // "aws/ec2" nests under "aws"; "aws/ec2/prod" does not.
        assert_eq!(child_labels(aws), vec!["ec2", "aws s3 ls"]);
    }

    #[test]
    fn test_scopes_are_separated() {
        let dirs = vec![
            directory("docker", Scope::Workspace),
            directory("system", Scope::Global),
        ];
        let root = build_scope_tree(Scope::Workspace, &dirs, &[]);
        assert_eq!(child_labels(&root), vec!["docker"]);
    }

    #[test]
    fn test_orphaned_subdirectory_surfaces_at_root() {
        // Parent "aws" was deleted; "aws/ec2" survived the non-recursive
        // cascade and must still be reachable.
        let dirs = vec![directory("aws/ec2", Scope::Global)];
        let cmds = vec![command("aws ec2 ls", Some("aws/ec2"), Scope::Global)];

        let root = build_scope_tree(Scope::Global, &dirs, &cmds);
        assert_eq!(child_labels(&root), vec!["ec2"]);

        let ec2 = match &root {
            TreeNode::Category { children, .. } => &children[0],
            _ => unreachable!(),
        };
        assert_eq!(child_labels(ec2), vec!["aws ec2 ls"]);
    }

    #[test]
    fn test_serialized_nodes_are_tagged() {
        let root = build_scope_tree(Scope::Global, &[], &[]);
        let json = serde_json::to_value(&root).unwrap();
        assert_eq!(json["type"], "category");
        assert_eq!(json["scope"], "global");
    }
}
