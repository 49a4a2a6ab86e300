mod components;
mod config;
mod history;
mod moderation;
mod platform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::history::HistoryView;
use crate::moderation::{KindFilter, ReprimandKind};
use crate::platform::discord::MessagePayload;

#[derive(Parser)]
#[command(name = "modhistory")]
#[command(about = "Render moderation history as Discord Components V2 messages", long_about = None)]
#[command(version)]
struct Cli {
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reference history layout
    Example {
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Render a member's history file (JSON or TOML)
    Render {
        file: PathBuf,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,

        /// Render every page as a JSON array
        #[arg(long, conflicts_with = "page")]
        all_pages: bool,

        /// Reprimand kinds to show, e.g. `ban,kick,hard_mute`
        #[arg(long, value_delimiter = ',')]
        filter: Option<Vec<ReprimandKind>>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries only the payload
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,modhistory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    info!("Loading configuration from: {}", cli.config.display());
    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    match cli.command {
        Commands::Example { output } => {
            let payload = MessagePayload::components_v2(history::example::moderation_history_example());
            emit(&payload, config.render.pretty, output.as_deref()).await?;
        }
        Commands::Render {
            file,
            page,
            all_pages,
            filter,
            category,
            output,
        } => {
            let history = moderation::loader::load_history(&file).await?;

            let filter = filter
                .map(KindFilter::from)
                .unwrap_or(config.history.default_filter);
            let category = category.or_else(|| config.history.category.clone());
            let pretty = config.render.pretty;

            let view = HistoryView::new(history, config.render)
                .with_filter(filter)
                .with_category(category);
            let page_count = view.page_count();
            info!(
                "{} matching reprimands across {} page(s)",
                view.entries().len(),
                page_count
            );

            if all_pages {
                let payloads = (0..page_count)
                    .map(|p| view.to_message(p))
                    .collect::<Result<Vec<_>>>()?;
                emit(&payloads, pretty, output.as_deref()).await?;
            } else {
                if page == 0 {
                    anyhow::bail!("Pages are numbered from 1");
                }
                let payload = view.to_message(page - 1)?;
                emit(&payload, pretty, output.as_deref()).await?;
            }
        }
    }

    Ok(())
}

/// Write `value` as JSON to `output`, or stdout when none is given
async fn emit<T: Serialize>(value: &T, pretty: bool, output: Option<&Path>) -> Result<()> {
    let mut json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    json.push('\n');

    match output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{json}"),
    }
    Ok(())
}
