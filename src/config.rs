use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::moderation::KindFilter;

/// Text a single reprimand card may spend on its reason, context and notes.
/// The rest of the 4000-char message budget goes to the header, profile card,
/// footer and the card's own title line.
pub const MAX_ENTRY_TEXT: usize = 3300;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RenderConfig {
    /// Pretty-print the JSON payload
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Most reprimands shown on one page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_max_reason_length")]
    pub max_reason_length: usize,
    /// Applies to the notes block and to the captured context separately
    #[serde(default = "default_max_notes_length")]
    pub max_notes_length: usize,
    #[serde(default = "default_avatar_size")]
    pub avatar_size: u16,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            page_size: default_page_size(),
            max_reason_length: default_max_reason_length(),
            max_notes_length: default_max_notes_length(),
            avatar_size: default_avatar_size(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HistoryConfig {
    /// Kinds shown when no filter is given on the command line (empty = all)
    #[serde(default)]
    pub default_filter: KindFilter,
    /// Restrict history and tallies to one moderation category
    #[serde(default)]
    pub category: Option<String>,
}

fn default_pretty() -> bool {
    true
}

fn default_page_size() -> usize {
    3
}

fn default_max_reason_length() -> usize {
    1500
}

fn default_max_notes_length() -> usize {
    900
}

fn default_avatar_size() -> u16 {
    4096
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(
                "No config file at {}, using defaults",
                path.display()
            );
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.render.page_size == 0 {
            anyhow::bail!("render.page_size must be at least 1");
        }
        let size = self.render.avatar_size;
        if !(16..=4096).contains(&size) || !size.is_power_of_two() {
            anyhow::bail!(
                "render.avatar_size must be a power of two between 16 and 4096 (got {})",
                size
            );
        }
        if self.render.max_reason_length < 16 || self.render.max_notes_length < 16 {
            anyhow::bail!("render.max_reason_length and render.max_notes_length must be at least 16");
        }
        let entry_text = self.render.max_reason_length + 2 * self.render.max_notes_length;
        if entry_text > MAX_ENTRY_TEXT {
            anyhow::bail!(
                "render.max_reason_length + 2 * render.max_notes_length must be at most {} (got {})",
                MAX_ENTRY_TEXT,
                entry_text
            );
        }
        Ok(())
    }
}
