//! JSON REST API for contacts.
//!
//! Exposes an axum [`Router`] backed by a [`ContactRepository`], and the
//! OpenAPI document describing exactly the routes that router mounts.
//! CORS, tracing and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new().merge(contacts_api::contacts_router(repo))
//! ```

pub mod contacts;
pub mod docs;
pub mod error;

use axum::{Router, routing::get};
use contacts_core::ContactRepository;

pub use docs::{ApiDoc, openapi};
pub use error::ApiError;

/// Build the `/contacts` route group for `repo`.
///
/// The returned `Router<()>` can be merged into any parent router regardless
/// of its own state type. Paths here must match the `#[utoipa::path]`
/// annotations in [`contacts`]; `docs::tests` checks that they do.
pub fn contacts_router(repo: ContactRepository) -> Router<()> {
  Router::new()
    .route(
      "/contacts",
      get(contacts::list).post(contacts::create),
    )
    .route(
      "/contacts/{id}",
      get(contacts::get_one)
        .put(contacts::update)
        .delete(contacts::delete),
    )
    .with_state(repo)
}
