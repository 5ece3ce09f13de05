//! One-shot maintenance tool: wipe the contacts collection and insert the
//! fixed sample records. Not part of the running service.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contacts_core::ContactRepository;
use contacts_server::{ServerConfig, seed};
use contacts_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Reset the contacts store to sample data")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Store connection string; overrides the configured `database_url`.
  #[arg(long)]
  database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = ServerConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  let url = cli.database_url.unwrap_or(cfg.database_url);

  let store = SqliteStore::connect(&url)
    .await
    .with_context(|| format!("failed to connect to store at {url}"))?;
  tracing::info!(url = %url, "connected for seeding");

  let repo = ContactRepository::new(Arc::new(store.clone()));
  let result = seed::run(&repo).await;

  drop(repo);
  if let Err(e) = store.close().await {
    tracing::warn!(error = %e, "failed to close store");
  }

  let inserted = result.context("failed to seed contacts")?;
  tracing::info!(inserted, "contacts successfully seeded");
  Ok(())
}
