//! `perfit` — outfit suggestions from your own closet.
//!
//! # Usage
//!
//! ```
//! perfit closet add --image img://polo.jpg --category Tops --subcategory Polo
//! perfit suggest --event "NYSC CDS meeting" --weather-desc "light rain" --save
//! perfit outfits list --from 2024-06-01 --to 2024-06-30
//! ```

mod cli;
mod commands;
mod config;
mod render;

use anyhow::Context as _;
use clap::Parser;
use perfit_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::{
  cli::{Cli, Command},
  config::AppConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let mut out = std::io::stdout().lock();

  // Classification needs neither config nor store.
  let command = match cli.command {
    Command::Classify(command) => return commands::classify(command, &mut out),
    other => other,
  };

  let cfg = AppConfig::load(&cli.config)?;

  if let Some(parent) = cfg.store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  let store = SqliteStore::open(&cfg.store_path)
    .await
    .with_context(|| format!("failed to open store at {:?}", cfg.store_path))?;
  tracing::debug!(path = ?cfg.store_path, "opened store");

  match command {
    Command::Closet(command) => commands::closet(&store, command, &mut out).await,
    Command::Suggest(args) => commands::suggest(&store, &cfg, args, &mut out).await,
    Command::Outfits(command) => commands::outfits(&store, command, &mut out).await,
    Command::Classify(command) => commands::classify(command, &mut out),
  }
}
