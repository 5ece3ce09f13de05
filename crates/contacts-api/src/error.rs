//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Repository failures are mapped onto HTTP here and nowhere else. Internal
//! failures are logged in full but only their [`ErrorKind`] reaches the
//! client.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use contacts_core::{Error as RepoError, ErrorKind};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

pub const NOT_FOUND_MESSAGE: &str = "Contact not found";

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("contact not found")]
  NotFound,

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The request body was not acceptable JSON.
  #[error("rejected body: {0}")]
  Body(#[from] JsonRejection),

  /// `context` is the client-facing message, e.g. "Error creating contact".
  #[error("{context}: {source}")]
  Internal {
    context: &'static str,
    #[source]
    source:  RepoError,
  },
}

impl ApiError {
  /// Classify a repository failure. `context` is only used for internal
  /// failures.
  pub fn from_repo(context: &'static str) -> impl FnOnce(RepoError) -> Self {
    move |e| match e.kind() {
      ErrorKind::Validation => match e {
        RepoError::Validation(msg) => ApiError::BadRequest(msg),
        other => ApiError::BadRequest(other.to_string()),
      },
      ErrorKind::NotFound => ApiError::NotFound,
      ErrorKind::Storage => ApiError::Internal { context, source: e },
    }
  }

  /// Like [`ApiError::from_repo`], but a validation failure on an existing
  /// record is an internal failure of the update, not a client error.
  pub fn from_repo_update(
    context: &'static str,
  ) -> impl FnOnce(RepoError) -> Self {
    move |e| match e.kind() {
      ErrorKind::NotFound => ApiError::NotFound,
      ErrorKind::Validation | ErrorKind::Storage => {
        ApiError::Internal { context, source: e }
      }
    }
  }
}

/// JSON body of every non-2xx response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
  pub message: String,
  /// Error kind (`storage`, or `validation` for a rejected update); present
  /// on 500 responses only.
  #[serde(skip_serializing_if = "Option::is_none")]
  #[schema(example = "storage")]
  pub error:   Option<String>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match self {
      ApiError::NotFound => (StatusCode::NOT_FOUND, ErrorBody {
        message: NOT_FOUND_MESSAGE.to_owned(),
        error:   None,
      }),
      ApiError::BadRequest(message) => {
        (StatusCode::BAD_REQUEST, ErrorBody { message, error: None })
      }
      ApiError::Body(rejection) => (rejection.status(), ErrorBody {
        message: rejection.body_text(),
        error:   None,
      }),
      ApiError::Internal { context, source } => {
        tracing::error!(error = %source, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
          message: context.to_owned(),
          error:   Some(source.kind().as_str().to_owned()),
        })
      }
    };
    (status, Json(body)).into_response()
  }
}
