/* src/git.rs */

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::process::Command;

/// A file whose changes are marked for inclusion in the next commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: String,
    pub status: String,
    pub is_staged: bool,
}

/// Aggregate counts describing the staged change set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
    pub renamed: usize,
    pub files: Vec<String>,
}

/// One `git log` entry. Only the message feeds the prompt; the metadata
/// fields round out the parsed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentCommit {
    #[allow(dead_code)]
    pub hash: String,
    pub message: String,
    #[allow(dead_code)]
    pub author: String,
    #[allow(dead_code)]
    pub date: String,
}

/// Thin wrapper over git shell-outs. Reads that are non-essential to the
/// commit flow (diff text, stats, history) swallow their own errors and
/// return empty results so a single git anomaly never blocks generation;
/// stage/commit/push propagate failures with the underlying cause attached.
#[derive(Debug, Clone)]
pub struct GitService {
    work_dir: PathBuf,
}

impl GitService {
    pub fn new() -> Result<Self> {
        Ok(Self {
            work_dir: std::env::current_dir()?,
        })
    }

    pub fn in_dir(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    fn git(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(&self.work_dir)
            .args(args)
            .output()
            .context("Failed to execute git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "'git {}' failed: {}",
                args.first().unwrap_or(&""),
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub fn is_repository(&self) -> bool {
        self.git(&["rev-parse", "--is-inside-work-tree"])
            .map(|out| out.trim() == "true")
            .unwrap_or(false)
    }

    pub fn staged_files(&self) -> Result<Vec<StagedFile>> {
        let out = self
            .git(&["diff", "--cached", "--name-status"])
            .context("Failed to get staged files")?;
        Ok(out.lines().filter_map(parse_name_status_line).collect())
    }

    /// Staged diff text; empty on any git error.
    pub fn diff(&self) -> String {
        self.git(&["diff", "--cached"]).unwrap_or_default()
    }

    /// Insert/delete counts from `--numstat` plus modify/rename counts from
    /// `--name-status`; all-zero on any git error.
    pub fn diff_stats(&self) -> DiffStats {
        let Ok(numstat) = self.git(&["diff", "--cached", "--numstat"]) else {
            return DiffStats::default();
        };

        let mut stats = DiffStats::default();
        for line in numstat.lines() {
            let mut fields = line.split('\t');
            let added = fields.next().and_then(|f| f.parse::<usize>().ok());
            let deleted = fields.next().and_then(|f| f.parse::<usize>().ok());
            // Binary files report "-" for both counts; skip those.
            stats.added += added.unwrap_or(0);
            stats.deleted += deleted.unwrap_or(0);
        }

        for file in self.staged_files().unwrap_or_default() {
            match file.status.as_str() {
                "modified" => stats.modified += 1,
                "renamed" => stats.renamed += 1,
                _ => {}
            }
            stats.files.push(file.path);
        }

        stats
    }

    /// Bounded recent-commit log, most recent first; empty on any git error.
    /// Common in fresh repositories with no commits yet.
    pub fn recent_commits(&self, limit: usize) -> Vec<RecentCommit> {
        let count = limit.to_string();
        let Ok(out) = self.git(&[
            "log",
            "-n",
            &count,
            "--pretty=format:%H%x1f%s%x1f%an%x1f%ad",
        ]) else {
            return Vec::new();
        };

        out.lines()
            .filter_map(|line| {
                let mut fields = line.splitn(4, '\u{1f}');
                Some(RecentCommit {
                    hash: fields.next()?.to_string(),
                    message: fields.next()?.to_string(),
                    author: fields.next()?.to_string(),
                    date: fields.next()?.to_string(),
                })
            })
            .collect()
    }

    pub fn has_staged_changes(&self) -> bool {
        self.staged_files()
            .map(|files| !files.is_empty())
            .unwrap_or(false)
    }

    pub fn has_unstaged_changes(&self) -> bool {
        let Ok(out) = self.git(&["status", "--porcelain"]) else {
            return false;
        };
        // Porcelain lines are "XY path"; Y is the worktree status.
        out.lines().any(|line| {
            line.starts_with("??") || line.chars().nth(1).is_some_and(|y| y != ' ')
        })
    }

    pub fn stage_all(&self) -> Result<()> {
        self.git(&["add", "."]).context("Failed to stage all files")?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.git(&["commit", "-m", message])
            .context("Failed to commit")?;
        Ok(())
    }

    pub fn push(&self) -> Result<()> {
        self.git(&["push"]).context("Failed to push")?;
        Ok(())
    }
}

fn parse_name_status_line(line: &str) -> Option<StagedFile> {
    let mut fields = line.split('\t');
    let status_code = fields.next()?;
    // Renames and copies list old and new paths; keep the new one.
    let path = fields.next_back()?.trim();
    if path.is_empty() {
        return None;
    }

    let status = match status_code.chars().next()? {
        'A' => "added",
        'M' => "modified",
        'D' => "deleted",
        'R' => "renamed",
        'C' => "copied",
        _ => "staged",
    };

    Some(StagedFile {
        path: path.to_string(),
        status: status.to_string(),
        is_staged: true,
    })
}
