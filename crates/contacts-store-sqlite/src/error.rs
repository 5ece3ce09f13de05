//! Error type for `contacts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// The store was constructed without a connection (see
  /// [`SqliteStore::unavailable`](crate::SqliteStore::unavailable)).
  #[error("store unavailable: {0}")]
  Unavailable(String),
}

impl From<Error> for contacts_core::Error {
  fn from(e: Error) -> Self { contacts_core::Error::storage(e) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
