use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, info};

use super::HistoryFile;

/// Load a history document from disk.
///
/// The format follows the file extension:
/// 1. `history.json`: the document as JSON
/// 2. `history.toml`: the same fields as TOML, timestamps quoted as RFC 3339 strings
///
/// ```toml
/// guild_id = 923991820868911184
///
/// [member]
/// id = 852717789071278100
/// username = "hime.san"
/// created_at = "2025-04-16T05:51:00Z"
///
/// [requested_by]
/// id = 852717789071278100
/// username = "hime.san"
/// ```
pub async fn load_history(path: &Path) -> Result<HistoryFile> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    let history = parse_history(path, &content)?;

    info!(
        "Loaded {} reprimands for {} ({}) from {}",
        history.reprimands.len(),
        history.member.username,
        history.member.id,
        path.display()
    );
    Ok(history)
}

fn parse_history(path: &Path, content: &str) -> Result<HistoryFile> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => serde_json::from_str(content)
            .with_context(|| format!("Failed to parse JSON history: {}", path.display())),
        Some("toml") => toml::from_str(content)
            .with_context(|| format!("Failed to parse TOML history: {}", path.display())),
        other => {
            // Unknown extension: try JSON first, then TOML
            debug!("Unrecognised history extension {:?}, sniffing content", other);
            serde_json::from_str(content).or_else(|json_err| {
                toml::from_str(content).with_context(|| {
                    format!(
                        "Failed to parse history file {} (not JSON: {}; TOML also failed)",
                        path.display(),
                        json_err
                    )
                })
            })
        }
    }
}
