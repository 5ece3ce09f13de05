//! Runtime configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the optional TOML
//! file, `PORT`, then `CONTACTS_*` environment variables (e.g.
//! `CONTACTS_DATABASE_URL`, `CONTACTS_BASE_URL`).

use std::path::Path;

use config::{
  Config, ConfigError, Environment, File, Map,
  builder::{ConfigBuilder, DefaultState},
};
use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://contacts.db";

/// Runtime server configuration, deserialised from `config.toml` and the
/// environment.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:         String,
  pub port:         u16,
  /// Store connection string, see
  /// [`SqliteStore::connect`](contacts_store_sqlite::SqliteStore::connect).
  pub database_url: String,
  /// Public base URL advertised in the API documentation.
  #[serde(default)]
  pub base_url:     Option<String>,
}

impl ServerConfig {
  /// Load from `path` (if it exists) and the process environment.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let builder =
      Config::builder().add_source(File::from(path).required(false));
    Self::from_builder(builder, std::env::vars().collect())
  }

  /// `vars` stands in for the process environment.
  fn from_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Map<String, String>,
  ) -> Result<Self, ConfigError> {
    let port: Map<String, String> = vars
      .get("PORT")
      .map(|p| ("PORT".to_owned(), p.clone()))
      .into_iter()
      .collect();

    builder
      .set_default("host", "0.0.0.0")?
      .set_default("port", i64::from(DEFAULT_PORT))?
      .set_default("database_url", DEFAULT_DATABASE_URL)?
      .add_source(Environment::default().source(Some(port)))
      .add_source(Environment::with_prefix("CONTACTS").source(Some(vars)))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The base URL shown in docs, falling back to the local listener.
  pub fn public_url(&self) -> String {
    self
      .base_url
      .clone()
      .unwrap_or_else(|| format!("http://localhost:{}", self.port))
  }
}
