//! Service bootstrap for the contacts API.
//!
//! Wires a store into a [`ContactRepository`], mounts the `/contacts` route
//! group, the liveness banner and the API documentation, and layers CORS and
//! request tracing on top.

pub mod config;
pub mod docs;
pub mod seed;

pub use config::ServerConfig;

use std::sync::Arc;

use axum::{Router, routing::get};
use contacts_core::ContactRepository;
use contacts_store_sqlite::SqliteStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const BANNER: &str = "📇 Contacts API is running";

/// Build the full application router.
pub fn router(repo: ContactRepository, config: &ServerConfig) -> Router {
  let openapi = Arc::new(contacts_api::openapi(Some(config.public_url().as_str())));

  Router::new()
    .route("/", get(|| async { BANNER }))
    .merge(contacts_api::contacts_router(repo))
    .merge(docs::router(openapi))
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// Connect to the store at `url`.
///
/// A failed connection is logged and replaced with an unavailable store, so
/// the service still starts and each request fails with a storage error.
pub async fn connect_store(url: &str) -> SqliteStore {
  match SqliteStore::connect(url).await {
    Ok(store) => {
      tracing::info!(url, "store connected");
      store
    }
    Err(e) => {
      tracing::warn!(url, error = %e, "store connection failed; serving without storage");
      SqliteStore::unavailable(e.to_string())
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn test_config() -> ServerConfig {
    ServerConfig {
      host:         "127.0.0.1".to_owned(),
      port:         8080,
      database_url: "sqlite::memory:".to_owned(),
      base_url:     None,
    }
  }

  async fn app() -> Router {
    let cfg = test_config();
    let store = connect_store(&cfg.database_url).await;
    router(ContactRepository::new(Arc::new(store)), &cfg)
  }

  async fn oneshot_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn root_serves_banner() {
    let app = app().await;
    let resp = oneshot_raw(&app, "GET", "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "📇 Contacts API is running");
  }

  #[tokio::test]
  async fn end_to_end_against_sqlite() {
    let app = app().await;

    let resp = oneshot_raw(
      &app,
      "POST",
      "/contacts",
      Some(json!({ "firstName": "John", "lastName": "Doe", "email": "john@example.com" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = json_body(resp).await["contactId"].as_str().unwrap().to_owned();
    let uri = format!("/contacts/{id}");

    let resp = oneshot_raw(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["firstName"], "John");

    let resp = oneshot_raw(
      &app,
      "PUT",
      &uri,
      Some(json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": "john@example.com",
        "favoriteColor": "Red",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["contact"]["favoriteColor"], "Red");

    let resp = oneshot_raw(&app, "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot_raw(&app, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn unreachable_store_still_serves_and_returns_500() {
    let cfg = test_config();
    let store = connect_store("/nonexistent-dir/definitely/missing/contacts.db").await;
    assert!(!store.is_available());
    let app = router(ContactRepository::new(Arc::new(store)), &cfg);

    let resp = oneshot_raw(&app, "GET", "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot_raw(&app, "GET", "/contacts", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      json_body(resp).await,
      json!({ "message": "Error retrieving contacts", "error": "storage" })
    );
  }

  #[tokio::test]
  async fn cors_headers_are_present() {
    let app = app().await;
    let req = Request::builder()
      .method("GET")
      .uri("/contacts")
      .header(header::ORIGIN, "https://frontend.example.com")
      .body(Body::empty())
      .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }
}
