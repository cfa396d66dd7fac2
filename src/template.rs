//! Placeholder templating for command strings
//!
//! Commands may embed bracketed placeholders (`git commit -m [message]`)
//! that are filled in at execution time. This module handles:
//! - Extracting placeholder descriptors from a command string
//! - Substituting collected values back into the string

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// A single placeholder extracted from a command string.
///
/// The `id` is synthetic (`input_0`, `input_1`, ...) and stable for a given
/// command text; `position` is the byte offset of the opening bracket at
/// extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    pub id: String,
    pub label: String,
    pub position: usize,
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Non-greedy: the first `]` terminates a placeholder, so adjacent
    // brackets like `[a][b]` split into two.
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]").expect("placeholder regex is valid"))
}

/// Extract every `[label]` span from `command`, in order of first occurrence.
///
/// Returns an empty vec when the command has no placeholders.
pub fn extract_placeholders(command: &str) -> Vec<Placeholder> {
    placeholder_regex()
        .captures_iter(command)
        .enumerate()
        .map(|(index, caps)| {
            let whole = caps.get(0).expect("match always has group 0");
            Placeholder {
                id: format!("input_{}", index),
                label: caps[1].to_string(),
                position: whole.start(),
            }
        })
        .collect()
}

/// Substitute collected values into `command`.
///
/// Missing values substitute as the empty string. Placeholders are replaced
/// in descending `position` order so earlier edits never shift the offset of
/// a not-yet-processed placeholder; with duplicate labels each value lands in
/// its own slot instead of the first textual match.
pub fn substitute(
    command: &str,
    placeholders: &[Placeholder],
    values: &HashMap<String, String>,
) -> String {
    let mut result = command.to_string();

    let mut ordered: Vec<&Placeholder> = placeholders.iter().collect();
    ordered.sort_by(|a, b| b.position.cmp(&a.position));

    for input in ordered {
        let value = values.get(&input.id).map(String::as_str).unwrap_or("");
        let needle = format!("[{}]", input.label);
        if input.position + needle.len() <= result.len()
            && result[input.position..].starts_with(&needle)
        {
            result.replace_range(input.position..input.position + needle.len(), value);
        } else if let Some(index) = result.find(&needle) {
            // Stale positions (text edited since extraction) fall back to the
            // first literal occurrence.
            result.replace_range(index..index + needle.len(), value);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_no_placeholders() {
        assert!(extract_placeholders("git status").is_empty());
    }

    #[test]
    fn test_extract_ordered_placeholders() {
        let inputs = extract_placeholders("git commit -m [message] --author [author]");
        assert_eq!(inputs.len(), 2);

        assert_eq!(inputs[0].id, "input_0");
        assert_eq!(inputs[0].label, "message");
        assert_eq!(inputs[0].position, 14);

        assert_eq!(inputs[1].id, "input_1");
        assert_eq!(inputs[1].label, "author");
        assert_eq!(inputs[1].position, 33);
    }

    #[test]
    fn test_extract_adjacent_brackets_non_greedy() {
        let inputs = extract_placeholders("run [a][b]");
        assert_eq!(inputs.len(), 2);
        assert_eq!(inputs[0].label, "a");
        assert_eq!(inputs[1].label, "b");
    }

    #[test]
    fn test_extract_ignores_empty_brackets() {
        assert!(extract_placeholders("echo []").is_empty());
    }

    #[test]
    fn test_substitute_basic() {
        let command = "git commit -m [message]";
        let inputs = extract_placeholders(command);
        let out = substitute(command, &inputs, &values(&[("input_0", "fix tests")]));
        assert_eq!(out, "git commit -m fix tests");
    }

    #[test]
    fn test_substitute_missing_value_becomes_empty() {
        let command = "curl [url] -o [file]";
        let inputs = extract_placeholders(command);
        let out = substitute(command, &inputs, &values(&[("input_0", "http://x")]));
        assert_eq!(out, "curl http://x -o ");
    }

    #[test]
    fn test_substitute_duplicate_labels_keep_their_slots() {
        let command = "cp [path] [path]";
        let inputs = extract_placeholders(command);
        assert_eq!(inputs.len(), 2);

        let out = substitute(
            command,
            &inputs,
            &values(&[("input_0", "a.txt"), ("input_1", "b.txt")]),
        );
        assert_eq!(out, "cp a.txt b.txt");
    }

    #[test]
    fn test_substitute_value_containing_brackets() {
        // A value that looks like a placeholder must not be re-expanded.
        let command = "echo [first] [second]";
        let inputs = extract_placeholders(command);
        let out = substitute(
            command,
            &inputs,
            &values(&[("input_0", "[second]"), ("input_1", "two")]),
        );
        assert_eq!(out, "echo [second] two");
    }

    #[test]
    fn test_round_trip_restores_original_text() {
        let command = "git commit -m [message]";
        let inputs = extract_placeholders(command);
        let out = substitute(command, &inputs, &values(&[("input_0", "[message]")]));
        assert_eq!(out, command);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Wrapping every extracted label back in brackets and
            // substituting must reproduce the original command.
            #[test]
            fn substitute_with_own_labels_is_identity(
                command in "[ -Za-z0-9_./\\[\\]-]{0,60}"
            ) {
                let inputs = extract_placeholders(&command);
                let vals: HashMap<String, String> = inputs
                    .iter()
                    .map(|i| (i.id.clone(), format!("[{}]", i.label)))
                    .collect();
                prop_assert_eq!(substitute(&command, &inputs, &vals), command);
            }

            #[test]
            fn substitution_leaves_no_matched_brackets(
                labels in proptest::collection::vec("[a-z]{1,8}", 0..4),
                value in "[a-z0-9 ]{0,12}"
            ) {
                let command = labels
                    .iter()
                    .map(|l| format!("cmd [{}]", l))
                    .collect::<Vec<_>>()
                    .join(" && ");
                let inputs = extract_placeholders(&command);
                let vals: HashMap<String, String> = inputs
                    .iter()
                    .map(|i| (i.id.clone(), value.clone()))
                    .collect();
                let out = substitute(&command, &inputs, &vals);
                prop_assert!(extract_placeholders(&out).is_empty());
            }
        }
    }
}
