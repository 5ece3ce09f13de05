//! `/api-docs` — rendered API documentation.
//!
//! The OpenAPI document is built once at startup and served as static JSON.
//! The HTML page is a Swagger UI shell loaded from a CDN that reads that JSON.

use std::sync::Arc;

use axum::{
  Json, Router,
  http::header,
  response::{Html, IntoResponse},
  routing::get,
};
use utoipa::openapi::OpenApi;

pub const DOCS_PATH: &str = "/api-docs";
pub const SPEC_PATH: &str = "/api-docs/openapi.json";

const SWAGGER_UI_VERSION: &str = "5.17.14";

pub fn router(openapi: Arc<OpenApi>) -> Router {
  Router::new()
    .route(DOCS_PATH, get(page))
    .route(
      SPEC_PATH,
      get(move || {
        let doc = openapi.clone();
        async move {
          ([(header::CACHE_CONTROL, "no-store")], Json(doc.as_ref())).into_response()
        }
      }),
    )
}

async fn page() -> Html<String> {
  Html(format!(
    r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Contacts API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@{v}/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{spec}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
    v = SWAGGER_UI_VERSION,
    spec = SPEC_PATH,
  ))
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use serde_json::Value;
  use tower::ServiceExt as _;

  use super::*;

  fn app() -> Router {
    router(Arc::new(contacts_api::openapi(Some("http://localhost:8080"))))
  }

  async fn get_body(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    let status = resp.status();
    let ct = resp
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(str::to_owned);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, ct, bytes.to_vec())
  }

  #[tokio::test]
  async fn docs_page_is_html_pointing_at_spec() {
    let (status, ct, body) = get_body(DOCS_PATH).await;
    assert_eq!(status, StatusCode::OK);
    assert!(ct.unwrap().starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains(SPEC_PATH), "{html}");
  }

  #[tokio::test]
  async fn spec_is_served_as_json() {
    let (status, _, body) = get_body(SPEC_PATH).await;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(doc["info"]["title"], "Contacts API");
    assert_eq!(doc["servers"][0]["url"], "http://localhost:8080");
  }
}
