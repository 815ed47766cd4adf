/* src/suggestions.rs */

use crate::git::StagedFile;
use serde::Deserialize;

pub const MAX_SUGGESTIONS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSuggestion {
    pub message: String,
    /// Conventional-commit-like prefix, extracted or inferred.
    pub kind: String,
    pub description: String,
    /// Set on suggestions produced without a successful model call.
    pub is_fallback: bool,
}

#[derive(Deserialize)]
struct RawResponse {
    suggestions: Vec<RawSuggestion>,
}

#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(default)]
    message: String,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Turns raw model text into at most four structured suggestions.
///
/// First pass: the substring from the first `{` to the last `}` is parsed as a
/// `{"suggestions": [...]}` object. If that fails at any step, a line-based
/// pass keeps lines with a leading `<number>. ` marker. The second pass may
/// yield fewer than four suggestions, or none at all.
pub fn parse_suggestions(raw: &str) -> Vec<CommitSuggestion> {
    if let Some(parsed) = parse_json_block(raw) {
        return parsed;
    }
    parse_numbered_lines(raw)
}

fn parse_json_block(raw: &str) -> Option<Vec<CommitSuggestion>> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }

    let parsed: RawResponse = serde_json::from_str(&raw[start..=end]).ok()?;
    Some(
        parsed
            .suggestions
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|s| {
                let kind = s
                    .kind
                    .filter(|k| !k.is_empty())
                    .unwrap_or_else(|| extract_type(&s.message));
                let description = s
                    .description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| s.message.clone());
                CommitSuggestion {
                    message: s.message,
                    kind,
                    description,
                    is_fallback: false,
                }
            })
            .collect(),
    )
}

fn parse_numbered_lines(raw: &str) -> Vec<CommitSuggestion> {
    let mut suggestions = Vec::new();
    for line in raw.lines() {
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
        let trimmed = line.trim();
        let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            continue;
        }
        let Some(rest) = trimmed[digits..].strip_prefix('.') else {
            continue;
        };
        let message = rest.trim();
        if message.is_empty() {
            continue;
        }
        suggestions.push(CommitSuggestion {
            message: message.to_string(),
            kind: extract_type(message),
            description: message.to_string(),
            is_fallback: false,
        });
    }
    suggestions
}

/// Leading `word:` prefix of a message, defaulting to `feat`.
pub fn extract_type(message: &str) -> String {
    match message.split_once(':') {
        Some((prefix, _))
            if !prefix.is_empty()
                && prefix.chars().all(|c| c.is_alphanumeric() || c == '_') =>
        {
            prefix.to_string()
        }
        _ => "feat".to_string(),
    }
}

/// The deterministic degraded result used when the model call fails: exactly
/// four messages derived only from staged file names, each flagged as fallback.
pub fn fallback_suggestions(staged_files: &[StagedFile]) -> Vec<CommitSuggestion> {
    let file_names = if staged_files.is_empty() {
        "files".to_string()
    } else {
        let mut names = staged_files
            .iter()
            .take(3)
            .map(|f| f.path.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if staged_files.len() > 3 {
            names.push_str("...");
        }
        names
    };

    [
        ("feat", "add"),
        ("fix", "update"),
        ("refactor", "improve"),
        ("docs", "update"),
    ]
    .into_iter()
    .map(|(kind, verb)| {
        let message = format!("{kind}: {verb} {file_names}");
        CommitSuggestion {
            message: message.clone(),
            kind: kind.to_string(),
            description: message,
            is_fallback: true,
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn staged(paths: &[&str]) -> Vec<StagedFile> {
        paths
            .iter()
            .map(|p| StagedFile {
                path: p.to_string(),
                status: "modified".to_string(),
                is_staged: true,
            })
            .collect()
    }

    #[test]
    fn well_formed_json_with_extra_entries_is_capped_at_four() {
        let raw = r#"Sure, here you go:
{"suggestions": [
  {"message": "feat: add login flow", "type": "feat", "description": "adds login"},
  {"message": "fix: handle empty token", "type": "fix", "description": "guards token"},
  {"message": "refactor: extract auth client", "type": "refactor", "description": "cleanup"},
  {"message": "docs: describe auth setup", "type": "docs", "description": "docs"},
  {"message": "chore: bump deps", "type": "chore", "description": "deps"}
]}"#;

        let suggestions = parse_suggestions(raw);
        assert_eq!(suggestions.len(), 4);
        assert_eq!(suggestions[0].message, "feat: add login flow");
        assert_eq!(suggestions[3].message, "docs: describe auth setup");
        assert!(suggestions.iter().all(|s| !s.is_fallback));
    }

    #[test]
    fn json_wrapped_in_markdown_fences_still_parses() {
        let raw = "```json\n{\"suggestions\": [{\"message\": \"fix: close file handle\"}]}\n```";
        let suggestions = parse_suggestions(raw);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].kind, "fix");
        // Missing description defaults to the message itself.
        assert_eq!(suggestions[0].description, "fix: close file handle");
    }

    #[test]
    fn numbered_lines_fallback_preserves_order() {
        let raw = "Here are some ideas:\n1. feat: add config loader\n2. fix: trim api key\n3. docs: update readme\nThat's all!";
        let suggestions = parse_suggestions(raw);
        assert_eq!(suggestions.len(), 3);
        assert_eq!(suggestions[0].message, "feat: add config loader");
        assert_eq!(suggestions[1].kind, "fix");
        assert_eq!(suggestions[2].message, "docs: update readme");
    }

    #[test]
    fn numbered_lines_are_capped_at_four() {
        let raw = "1. one\n2. two\n3. three\n4. four\n5. five";
        assert_eq!(parse_suggestions(raw).len(), 4);
    }

    #[test]
    fn garbage_input_yields_empty_list() {
        assert_eq!(parse_suggestions("no json here, no list either"), vec![]);
        assert_eq!(parse_suggestions(""), vec![]);
    }

    #[test]
    fn json_without_suggestions_array_falls_back_to_lines() {
        let raw = "{\"commits\": []}\n1. fix: recover from bad schema";
        let suggestions = parse_suggestions(raw);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].message, "fix: recover from bad schema");
    }

    #[test]
    fn extract_type_reads_the_prefix() {
        assert_eq!(extract_type("fix: correct bug"), "fix");
        assert_eq!(extract_type("correct bug"), "feat");
        assert_eq!(extract_type("not a: prefix"), "feat");
        assert_eq!(extract_type(": empty"), "feat");
    }

    #[test]
    fn fallback_is_always_four_flagged_suggestions() {
        let suggestions = fallback_suggestions(&staged(&["a.rs", "b.rs"]));
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions.iter().all(|s| s.is_fallback));
        assert_eq!(suggestions[0].message, "feat: add a.rs, b.rs");
        assert_eq!(suggestions[1].message, "fix: update a.rs, b.rs");
        assert_eq!(suggestions[2].message, "refactor: improve a.rs, b.rs");
        assert_eq!(suggestions[3].message, "docs: update a.rs, b.rs");
    }

    #[test]
    fn fallback_truncates_long_file_lists() {
        let suggestions = fallback_suggestions(&staged(&["a", "b", "c", "d"]));
        assert_eq!(suggestions[0].message, "feat: add a, b, c...");
    }

    #[test]
    fn fallback_without_staged_files_uses_a_placeholder() {
        let suggestions = fallback_suggestions(&[]);
        assert_eq!(suggestions[0].message, "feat: add files");
    }
}
