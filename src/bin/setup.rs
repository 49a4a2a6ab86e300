//! modhistory setup wizard.
//!
//! Asks a few questions on the terminal and writes `config.toml` to the
//! project root (`MODHISTORY_ROOT`, or the current directory).

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

// Same values, same order as `ReprimandKind::as_str` in src/moderation/mod.rs
const KINDS: [&str; 10] = [
    "warning",
    "notice",
    "ban",
    "kick",
    "note",
    "mute",
    "hard_mute",
    "censored",
    "filtered",
    "role",
];

// Mirrors `MAX_ENTRY_TEXT` in src/config.rs
const MAX_ENTRY_TEXT: usize = 3300;

struct ConfigParams<'a> {
    pretty: bool,
    page_size: usize,
    max_reason_length: usize,
    max_notes_length: usize,
    avatar_size: u16,
    default_filter: &'a str,
    category: &'a str,
}

/// Normalise a comma-separated kind list ("Hard Mute, ban") to config values
fn parse_kinds(input: &str) -> Result<Vec<String>> {
    let mut kinds = Vec::new();
    for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind = raw.to_ascii_lowercase().replace([' ', '-'], "_");
        if !KINDS.contains(&kind.as_str()) {
            bail!("Unknown reprimand kind: {raw} (expected one of {})", KINDS.join(", "));
        }
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

/// Reject values `Config::load` would refuse, before anything is written
fn check_params(p: &ConfigParams<'_>) -> Result<()> {
    if p.page_size == 0 {
        bail!("Page size must be at least 1");
    }
    if !(16..=4096).contains(&p.avatar_size) || !p.avatar_size.is_power_of_two() {
        bail!(
            "Avatar size must be a power of two between 16 and 4096 (got {})",
            p.avatar_size
        );
    }
    if p.max_reason_length < 16 || p.max_notes_length < 16 {
        bail!("Reason and notes lengths must be at least 16");
    }
    let entry_text = p.max_reason_length + 2 * p.max_notes_length;
    if entry_text > MAX_ENTRY_TEXT {
        bail!("Reason length + 2 * notes length must be at most {MAX_ENTRY_TEXT} (got {entry_text})");
    }
    Ok(())
}

/// Produces a valid config.toml string. Extracted so it can be unit-tested.
fn format_config(p: &ConfigParams<'_>) -> Result<String> {
    check_params(p)?;
    let kinds = parse_kinds(p.default_filter)?
        .iter()
        .map(|k| format!("\"{k}\""))
        .collect::<Vec<_>>()
        .join(", ");

    let category_line = if p.category.is_empty() {
        "# category = \"Spam\"".to_owned()
    } else {
        format!(
            "category = \"{}\"",
            p.category.replace('\\', "\\\\").replace('"', "\\\"")
        )
    };

    let pretty = p.pretty;
    let page_size = p.page_size;
    let max_reason_length = p.max_reason_length;
    let max_notes_length = p.max_notes_length;
    let avatar_size = p.avatar_size;

    Ok(format!(
        r#"[render]
pretty = {pretty}
page_size = {page_size}
max_reason_length = {max_reason_length}
max_notes_length = {max_notes_length}
avatar_size = {avatar_size}

[history]
# Empty shows every kind
default_filter = [{kinds}]
{category_line}
"#
    ))
}

fn run_cli(project_root: &Path) -> Result<(PathBuf, String)> {
    use std::io::{self, Write};

    println!("=== modhistory setup ===\n");

    let read_line = |prompt: &str| -> Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut buf = String::new();
        io::stdin().read_line(&mut buf)?;
        Ok(buf.trim().to_owned())
    };

    let or_default = |s: String, default: &str| {
        if s.is_empty() {
            default.to_owned()
        } else {
            s
        }
    };

    let pretty = !read_line("Pretty-print JSON? [Y/n]: ")?
        .to_ascii_lowercase()
        .starts_with('n');
    let page_size: usize = or_default(read_line("Reprimands per page [3]: ")?, "3")
        .parse()
        .context("Page size must be a number")?;
    let avatar_size: u16 = or_default(read_line("Avatar size [4096]: ")?, "4096")
        .parse()
        .context("Avatar size must be a number")?;
    let default_filter = read_line("Default kinds, comma-separated (empty = all): ")?;
    let category = read_line("Category (optional): ")?;

    let config = format_config(&ConfigParams {
        pretty,
        page_size,
        max_reason_length: 1500,
        max_notes_length: 900,
        avatar_size,
        default_filter: &default_filter,
        category: &category,
    })?;

    Ok((project_root.join("config.toml"), config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let project_root =
        PathBuf::from(std::env::var("MODHISTORY_ROOT").unwrap_or_else(|_| ".".to_string()));

    let (config_path, config) = run_cli(&project_root)?;

    tokio::fs::write(&config_path, config)
        .await
        .with_context(|| format!("Could not write {}", config_path.display()))?;

    println!("\n✓  config.toml saved to {}", config_path.display());
    println!("   Render a history with:  cargo run -- render demos/history.toml");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params<'a>(page_size: usize, default_filter: &'a str, category: &'a str) -> ConfigParams<'a> {
        ConfigParams {
            pretty: true,
            page_size,
            max_reason_length: 1500,
            max_notes_length: 900,
            avatar_size: 4096,
            default_filter,
            category,
        }
    }

    fn cfg(page_size: usize, default_filter: &str, category: &str) -> Result<String> {
        format_config(&params(page_size, default_filter, category))
    }

    #[test]
    fn test_render_section_present() {
        let out = cfg(3, "", "").unwrap();
        assert!(out.contains("[render]"));
        assert!(out.contains("pretty = true"));
        assert!(out.contains("page_size = 3"));
        assert!(out.contains("avatar_size = 4096"));
    }

    #[test]
    fn test_empty_filter_means_all() {
        let out = cfg(3, "", "").unwrap();
        assert!(out.contains("default_filter = []"));
    }

    #[test]
    fn test_filter_kinds_normalised() {
        let out = cfg(3, "Ban, hard mute,kick, ban", "").unwrap();
        assert!(out.contains(r#"default_filter = ["ban", "hard_mute", "kick"]"#));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(cfg(3, "ban, yeet", "").is_err());
    }

    #[test]
    fn test_category_included_when_set() {
        let out = cfg(3, "", "Spam").unwrap();
        assert!(out.contains(r#"category = "Spam""#));
    }

    #[test]
    fn test_category_commented_when_empty() {
        let out = cfg(3, "", "").unwrap();
        assert!(out.contains("# category ="));
        assert!(!out.contains("\ncategory = "));
    }

    #[test]
    fn test_output_parses_as_toml() {
        let out = cfg(2, "note", "Art \"Theft\"").unwrap();
        let value: toml::Value = toml::from_str(&out).unwrap();
        assert_eq!(value["render"]["page_size"].as_integer(), Some(2));
        assert_eq!(value["history"]["category"].as_str(), Some("Art \"Theft\""));
    }

    #[test]
    fn test_avatar_size_checked_before_writing() {
        let mut p = params(3, "", "");
        p.avatar_size = 1000;
        let err = format_config(&p).unwrap_err();
        assert!(err.to_string().contains("power of two"));

        p.avatar_size = 8;
        assert!(format_config(&p).is_err());

        p.avatar_size = 16;
        assert!(format_config(&p).is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(cfg(0, "", "").is_err());
    }

    #[test]
    fn test_entry_text_budget_checked() {
        let mut p = params(3, "", "");
        p.max_reason_length = 1501;
        assert!(format_config(&p).is_err());
    }

    #[test]
    fn test_kinds_match_reprimand_kind() {
        let source = include_str!("../moderation/mod.rs");
        assert!(source.contains(&format!("pub const ALL: [ReprimandKind; {}]", KINDS.len())));
        for kind in KINDS {
            assert!(
                source.contains(&format!("=> \"{kind}\",")),
                "{kind} is not a ReprimandKind::as_str value"
            );
        }
    }

    #[test]
    fn test_entry_budget_matches_config() {
        let source = include_str!("../config.rs");
        assert!(source.contains(&format!("pub const MAX_ENTRY_TEXT: usize = {MAX_ENTRY_TEXT};")));
    }
}
