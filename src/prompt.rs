/* src/prompt.rs */

use crate::config::{CommitStyle, Config};
use crate::git::{DiffStats, RecentCommit, StagedFile};

/// Diff text included in the prompt is capped at this many characters; larger
/// diffs get an explicit truncation marker. Tunable, not a correctness knob.
pub const DIFF_CHAR_LIMIT: usize = 2000;

/// Only the most recent few commit messages are offered as style reference.
pub const HISTORY_SAMPLE: usize = 5;

pub const SYSTEM_PROMPT: &str = "You are an expert at writing clear, concise, and meaningful git commit messages.\n\
Generate commit messages that follow best practices and are helpful for future developers.\n\
IMPORTANT: Output your response in strict JSON format with the following schema:\n\
{\n  \"suggestions\": [\n    {\n      \"message\": \"commit message here\",\n      \"type\": \"feat/fix/etc\",\n      \"description\": \"brief explanation\"\n    }\n  ]\n}";

/// Renders the adapter inputs into a single prompt. Deterministic: the same
/// inputs always produce the same text. `intent` switches to the user-guided
/// variant, embedding the user's description verbatim.
pub fn build_prompt(
    staged_files: &[StagedFile],
    diff: &str,
    recent_commits: &[RecentCommit],
    stats: &DiffStats,
    config: &Config,
    intent: Option<&str>,
) -> String {
    let mut prompt = String::new();

    match intent {
        Some(intent) => {
            prompt.push_str(&format!(
                "The user wants commit messages based on their description: \"{intent}\"\n\n"
            ));
            prompt.push_str(
                "Analyze the following git changes and generate 4 different commit message suggestions that match the user's intent.\n\n",
            );
            prompt.push_str(
                "IMPORTANT: Carefully analyze the git diff below to understand WHAT changes were actually made:\n",
            );
            prompt.push_str("- Look for added/removed/modified lines (lines starting with +, -, or @@)\n");
            prompt.push_str("- Identify if files were added, deleted, or modified\n");
            prompt.push_str(
                "- Understand the nature of the changes (new features, bug fixes, refactoring, etc.)\n",
            );
            prompt.push_str(&format!("- Match the user's description: \"{intent}\"\n\n"));
        }
        None => {
            prompt.push_str(
                "Analyze the following git changes and generate 4 different commit message suggestions.\n\n",
            );
            prompt.push_str(
                "IMPORTANT: Carefully analyze the git diff below to understand WHAT changes were actually made:\n",
            );
            prompt.push_str("- Look for added/removed/modified lines (lines starting with +, -, or @@)\n");
            prompt.push_str("- Identify if files were added, deleted, or modified\n");
            prompt.push_str(
                "- Understand the nature of the changes (new features, bug fixes, refactoring, etc.)\n",
            );
            prompt.push_str(
                "- DO NOT assume all changes are \"add\" operations - check the diff carefully\n\n",
            );
        }
    }

    prompt.push_str("Files staged for commit:\n");
    prompt.push_str(&files_text(staged_files));
    prompt.push_str(&stats_text(stats));
    prompt.push_str("\n\n");

    prompt.push_str(&diff_section(diff));
    prompt.push_str("\n\n");

    let history = history_text(recent_commits);
    if !history.is_empty() {
        prompt.push_str("Recent commit history for reference:\n");
        prompt.push_str(&history);
        prompt.push_str("\n\n");
    }

    prompt.push_str("Requirements:\n");
    prompt.push_str("- Generate exactly 4 different commit messages\n");
    prompt.push_str("- Each message should be 50-72 characters\n");
    prompt.push_str(&format!("- {}\n", style_instruction(config.commit_style)));
    match intent {
        Some(intent) => prompt.push_str(&format!(
            "- Make them specific to the actual changes shown AND match the user's intent: \"{intent}\"\n"
        )),
        None => prompt.push_str("- Make them specific to the actual changes shown\n"),
    }
    prompt.push_str("- Focus on what changed, not how it changed\n");

    if !config.custom_prompt.is_empty() {
        prompt.push_str(&format!(
            "\nAdditional instructions: {}\n",
            config.custom_prompt
        ));
    }

    prompt.push_str("\nOutput ONLY valid JSON.");
    prompt
}

pub fn style_instruction(style: CommitStyle) -> &'static str {
    match style {
        CommitStyle::Conventional => "Use conventional commit format (feat:, fix:, docs:, etc.)",
        CommitStyle::Simple => "Keep messages simple and concise",
        CommitStyle::Detailed => "Include detailed descriptions of changes",
    }
}

fn files_text(staged_files: &[StagedFile]) -> String {
    staged_files
        .iter()
        .map(|f| format!("- {}", f.path))
        .collect::<Vec<_>>()
        .join("\n")
}

fn stats_text(stats: &DiffStats) -> String {
    format!(
        "\nChange statistics:\n- {} lines added\n- {} lines deleted\n- {} files modified\n- {} files renamed\n- {} total files changed",
        stats.added,
        stats.deleted,
        stats.modified,
        stats.renamed,
        stats.files.len()
    )
}

fn diff_section(diff: &str) -> String {
    if diff.is_empty() {
        return "No diff available".to_string();
    }

    let truncated: String = diff.chars().take(DIFF_CHAR_LIMIT).collect();
    let marker = if diff.chars().count() > DIFF_CHAR_LIMIT {
        "\n...(truncated)"
    } else {
        ""
    };
    format!(
        "Complete git diff (analyze this carefully to understand the actual changes):\n{truncated}{marker}"
    )
}

fn history_text(recent_commits: &[RecentCommit]) -> String {
    recent_commits
        .iter()
        .take(HISTORY_SAMPLE)
        .map(|c| format!("- {}", c.message))
        .collect::<Vec<_>>()
        .join("\n")
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

    fn commit(message: &str) -> RecentCommit {
        RecentCommit {
            hash: "abc123".to_string(),
            message: message.to_string(),
            author: "Test".to_string(),
            date: "Mon Jan 1".to_string(),
        }
    }

    #[test]
    fn unguided_prompt_lists_files_stats_and_diff() {
        let files = staged(&["src/a.rs", "src/b.rs"]);
        let stats = DiffStats {
            added: 10,
            deleted: 2,
            modified: 2,
            renamed: 0,
            files: vec!["src/a.rs".to_string(), "src/b.rs".to_string()],
        };
        let prompt = build_prompt(&files, "+foo\n-bar", &[], &stats, &Config::default(), None);

        assert!(prompt.contains("- src/a.rs"));
        assert!(prompt.contains("- 10 lines added"));
        assert!(prompt.contains("- 2 total files changed"));
        assert!(prompt.contains("+foo\n-bar"));
        assert!(prompt.ends_with("Output ONLY valid JSON."));
        assert!(!prompt.contains("...(truncated)"));
    }

    #[test]
    fn long_diffs_are_capped_with_a_marker() {
        let diff = "x".repeat(DIFF_CHAR_LIMIT + 100);
        let prompt = build_prompt(
            &staged(&["a"]),
            &diff,
            &[],
            &DiffStats::default(),
            &Config::default(),
            None,
        );
        assert!(prompt.contains("...(truncated)"));
        assert!(!prompt.contains(&"x".repeat(DIFF_CHAR_LIMIT + 1)));
    }

    #[test]
    fn empty_diff_is_called_out() {
        let prompt = build_prompt(
            &staged(&["a"]),
            "",
            &[],
            &DiffStats::default(),
            &Config::default(),
            None,
        );
        assert!(prompt.contains("No diff available"));
    }

    #[test]
    fn guided_prompt_embeds_the_intent_verbatim() {
        let prompt = build_prompt(
            &staged(&["a"]),
            "+x",
            &[],
            &DiffStats::default(),
            &Config::default(),
            Some("rework the login flow"),
        );
        assert!(prompt.starts_with(
            "The user wants commit messages based on their description: \"rework the login flow\""
        ));
        assert!(prompt.contains("AND match the user's intent: \"rework the login flow\""));
    }

    #[test]
    fn history_is_sampled_to_five_most_recent() {
        let commits: Vec<RecentCommit> =
            (0..8).map(|i| commit(&format!("commit {i}"))).collect();
        let prompt = build_prompt(
            &staged(&["a"]),
            "+x",
            &commits,
            &DiffStats::default(),
            &Config::default(),
            None,
        );
        assert!(prompt.contains("- commit 4"));
        assert!(!prompt.contains("- commit 5"));
    }

    #[test]
    fn style_directive_follows_the_fixed_mapping() {
        assert_eq!(
            style_instruction(CommitStyle::Conventional),
            "Use conventional commit format (feat:, fix:, docs:, etc.)"
        );
        assert_eq!(
            style_instruction(CommitStyle::Simple),
            "Keep messages simple and concise"
        );
        assert_eq!(
            style_instruction(CommitStyle::Detailed),
            "Include detailed descriptions of changes"
        );
    }

    #[test]
    fn custom_prompt_is_appended_when_configured() {
        let config = Config {
            custom_prompt: "Mention ticket IDs".to_string(),
            ..Config::default()
        };
        let prompt = build_prompt(
            &staged(&["a"]),
            "+x",
            &[],
            &DiffStats::default(),
            &config,
            None,
        );
        assert!(prompt.contains("Additional instructions: Mention ticket IDs"));
    }
}
