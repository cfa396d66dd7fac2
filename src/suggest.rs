//! Shell-history suggestions
//!
//! Mines the user's shell history for commands worth registering:
//! - Parses bash, zsh (extended format), and fish history files
//! - Filters out navigation noise (`cd`, bare `ls`, comments, ...)
//! - Ranks by frequency and keeps the top candidates
//! - Drops anything already registered
//!
//! Also suggests a display name for a raw command line, so "add command"
//! flows can prefill their name field.

use crate::error::Result;
use crate::registry::CommandRegistry;
use crate::storage::StorageAdapter;
use regex::Regex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

/// How many ranked suggestions to keep.
pub const SUGGESTION_LIMIT: usize = 50;

/// History file dialects this module understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlavor {
    Bash,
    Zsh,
    Fish,
}

/// The history files scanned by [`read_shell_history`], in scan order.
pub fn history_files() -> Vec<(ShellFlavor, PathBuf)> {
    let Some(home) = dirs::home_dir() else {
        return Vec::new();
    };
    vec![
        (ShellFlavor::Bash, home.join(".bash_history")),
        (ShellFlavor::Zsh, home.join(".zsh_history")),
        (
            ShellFlavor::Fish,
            home.join(".config").join("fish").join("fish_history"),
        ),
    ]
}

fn zsh_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^: \d+:\d+;(.+)$").expect("zsh history regex is valid"))
}

fn fish_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^- cmd: (.+)$").expect("fish history regex is valid"))
}

fn skip_regexes() -> &'static [Regex] {
    static RES: OnceLock<Vec<Regex>> = OnceLock::new();
    RES.get_or_init(|| {
        [
            r"^cd\s",
            r"^ls\s*$",
            r"^pwd\s*$",
            r"^clear\s*$",
            r"^exit\s*$",
            r"^history\s*$",
            r#"^echo\s+["']"#,
            r"^\s*$",
            r"^#",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("skip pattern is valid"))
        .collect()
    })
}

/// Whether a history line is registration noise.
fn should_skip(command: &str) -> bool {
    skip_regexes().iter().any(|re| re.is_match(command))
}

/// Parse one history file's content into raw command lines.
pub fn parse_history(flavor: ShellFlavor, content: &str) -> Vec<String> {
    match flavor {
        ShellFlavor::Bash => content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.trim().to_string())
            .collect(),
        ShellFlavor::Zsh => content
            .lines()
            .filter_map(|line| {
                if let Some(caps) = zsh_line_regex().captures(line) {
                    Some(caps[1].to_string())
                } else if !line.trim().is_empty() && !line.starts_with(':') {
                    // Plain-format zsh history falls back to bash rules.
                    Some(line.trim().to_string())
                } else {
                    None
                }
            })
            .collect(),
        ShellFlavor::Fish => content
            .lines()
            .filter_map(|line| fish_line_regex().captures(line))
            .map(|caps| caps[1].to_string())
            .collect(),
    }
}

/// Rank raw command lines by frequency, drop noise, keep the top
/// [`SUGGESTION_LIMIT`].
pub fn rank_commands<I: IntoIterator<Item = String>>(raw: I) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for line in raw {
        let command = line.trim().to_string();
        if command.is_empty() || should_skip(&command) {
            continue;
        }
        if !counts.contains_key(&command) {
            order.push(command.clone());
        }
        *counts.entry(command).or_insert(0) += 1;
    }

    // Stable on ties: first-seen order breaks equal frequencies.
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.truncate(SUGGESTION_LIMIT);
    order
}

/// Read and rank the user's shell history across all known files.
///
/// Unreadable or absent files are skipped silently; an empty result just
/// means there is nothing to suggest.
pub fn read_shell_history() -> Vec<String> {
    let mut raw = Vec::new();
    for (flavor, path) in history_files() {
        if let Ok(content) = std::fs::read_to_string(&path) {
            raw.extend(parse_history(flavor, &content));
        }
    }
    rank_commands(raw)
}

/// Drop candidates whose text is already registered (case-insensitive).
pub fn filter_registered(candidates: Vec<String>, existing: &[String]) -> Vec<String> {
    let taken: std::collections::HashSet<String> =
        existing.iter().map(|cmd| cmd.to_lowercase()).collect();
    candidates
        .into_iter()
        .filter(|cmd| !taken.contains(&cmd.to_lowercase()))
        .collect()
}

/// Shell-history suggestions not yet present in the registry.
pub async fn suggest_commands<S: StorageAdapter>(
    registry: &CommandRegistry<S>,
) -> Result<Vec<String>> {
    let existing: Vec<String> = registry
        .all_commands()
        .await?
        .into_iter()
        .map(|cmd| cmd.command)
        .collect();
    Ok(filter_registered(read_shell_history(), &existing))
}

/// Suggest a display name for a raw command line.
pub fn suggest_name(command: &str) -> String {
    let known: &[(&str, &str)] = &[
        ("git status", "Git Status"),
        ("git add .", "Git Add All"),
        ("git commit", "Git Commit"),
        ("git push", "Git Push"),
        ("git pull", "Git Pull"),
        ("npm install", "NPM Install"),
        ("npm start", "NPM Start"),
        ("npm run dev", "NPM Dev"),
        ("npm run build", "NPM Build"),
        ("npm test", "NPM Test"),
        ("yarn install", "Yarn Install"),
        ("yarn start", "Yarn Start"),
        ("docker build", "Docker Build"),
        ("docker run", "Docker Run"),
        ("docker ps", "Docker PS"),
        ("docker stop", "Docker Stop"),
        ("node --version", "Node Version"),
        ("npm --version", "NPM Version"),
    ];

    let lowered = command.to_lowercase();
    for (pattern, name) in known {
        if lowered == *pattern {
            return name.to_string();
        }
    }
    for (pattern, name) in known {
        if lowered.contains(pattern) {
            return name.to_string();
        }
    }

    for (prefix, label) in [
        ("git ", "Git"),
        ("npm ", "NPM"),
        ("docker ", "Docker"),
        ("yarn ", "Yarn"),
    ] {
        if let Some(rest) = command.strip_prefix(prefix) {
            if let Some(sub) = rest.split_whitespace().next() {
                return format!("{} {}", label, capitalize(sub));
            }
        }
    }

    capitalize(command.split_whitespace().next().unwrap_or(command))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
