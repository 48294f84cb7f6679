use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Settings read from `leaderboard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardConfig {
    /// External roster file; the embedded dataset is used when unset.
    #[serde(default)]
    pub roster: Option<PathBuf>,
    /// Static activity figure shown on the statistics panel.
    #[serde(default = "default_activity_percent")]
    pub activity_percent: u8,
    #[serde(default = "default_top_achievers")]
    pub top_achievers: usize,
}

fn default_activity_percent() -> u8 {
    85
}
fn default_top_achievers() -> usize {
    3
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            roster: None,
            activity_percent: default_activity_percent(),
            top_achievers: default_top_achievers(),
        }
    }
}

impl LeaderboardConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: LeaderboardConfig = toml::from_str(raw)?;
        if config.activity_percent > 100 {
            anyhow::bail!(
                "activity_percent must be between 0 and 100, got {}",
                config.activity_percent
            );
        }
        Ok(config)
    }

    /// Load config from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid config {}", path.display()))
    }
}
