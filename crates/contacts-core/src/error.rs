//! Error types for `contacts-core`.

use thiserror::Error;

use crate::contact::ContactId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Validation(String),

  #[error("contact not found: {0}")]
  NotFound(ContactId),

  /// The identifier could not be parsed. Surfaces as a storage failure, the
  /// same way a store rejects an identifier it cannot cast.
  #[error("malformed contact id: {0:?}")]
  MalformedId(String),

  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap any backend error as a storage failure.
  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Error::Validation(_) => ErrorKind::Validation,
      Error::NotFound(_) => ErrorKind::NotFound,
      Error::MalformedId(_) | Error::Storage(_) => ErrorKind::Storage,
    }
  }
}

/// Stable, sanitized classification of an [`Error`]. This is what crosses the
/// HTTP boundary; the error itself never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  Validation,
  NotFound,
  Storage,
}

impl ErrorKind {
  pub fn as_str(self) -> &'static str {
    match self {
      ErrorKind::Validation => "validation",
      ErrorKind::NotFound => "not_found",
      ErrorKind::Storage => "storage",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
