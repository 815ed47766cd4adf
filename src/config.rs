/* src/config.rs */

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumIter, EnumString};

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_MAX_HISTORY_COMMITS: usize = 50;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommitStyle {
    Conventional,
    Simple,
    Detailed,
}

/// User preferences, persisted as a single JSON object at `~/.better-commit.json`.
/// Field names stay camelCase on disk for compatibility with existing config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub groq_api_key: Option<String>,
    pub model: String,
    pub max_history_commits: usize,
    pub commit_style: CommitStyle,
    pub language: String,
    pub custom_prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_history_commits: DEFAULT_MAX_HISTORY_COMMITS,
            commit_style: CommitStyle::Conventional,
            language: "en".to_string(),
            custom_prompt: String::new(),
        }
    }
}

impl Config {
    /// Loads the persisted config merged over defaults. A missing or unreadable
    /// file yields the defaults; unknown fields in the file are ignored.
    pub fn load() -> Self {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Persists the full config (not a diff). Last writer wins.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("Failed to save config to {}", path.display()))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let base_dirs = directories::BaseDirs::new().context("Could not find home directory")?;
        Ok(base_dirs.home_dir().join(".better-commit.json"))
    }

    pub fn has_api_key(&self) -> bool {
        self.groq_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
