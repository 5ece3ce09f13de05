//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path             | Notes |
//! |----------|------------------|-------|
//! | `GET`    | `/contacts`      | All contacts, insertion order |
//! | `POST`   | `/contacts`      | Body: [`ContactFields`]; returns 201 + `contactId` |
//! | `GET`    | `/contacts/{id}` | 404 if not found |
//! | `PUT`    | `/contacts/{id}` | Body: [`ContactFields`]; full replacement, 404 if not found |
//! | `DELETE` | `/contacts/{id}` | 404 if not found |
//!
//! Each handler makes exactly one repository call.

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use contacts_core::{Contact, ContactFields, ContactId, ContactRepository};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorBody};

// ─── Response bodies ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBody {
  #[schema(example = "Contact created successfully")]
  pub message:    String,
  #[schema(value_type = String, format = Uuid)]
  pub contact_id: ContactId,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedBody {
  #[schema(example = "Contact updated successfully")]
  pub message: String,
  pub contact: Contact,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBody {
  #[schema(example = "Contact deleted successfully")]
  pub message:    String,
  #[schema(value_type = String, format = Uuid)]
  pub contact_id: ContactId,
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /contacts`
#[utoipa::path(
  get,
  path = "/contacts",
  tag = "Contacts",
  summary = "Get all contacts",
  responses(
    (status = 200, description = "The list of contacts", body = [Contact]),
    (status = 500, description = "Store failure", body = ErrorBody),
  )
)]
pub async fn list(
  State(repo): State<ContactRepository>,
) -> Result<Json<Vec<Contact>>, ApiError> {
  let contacts = repo
    .list_all()
    .await
    .map_err(ApiError::from_repo("Error retrieving contacts"))?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/{id}`
#[utoipa::path(
  get,
  path = "/contacts/{id}",
  tag = "Contacts",
  summary = "Get a contact by ID",
  params(("id" = String, Path, description = "The contact ID")),
  responses(
    (status = 200, description = "Contact retrieved successfully", body = Contact),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Store failure or malformed ID", body = ErrorBody),
  )
)]
pub async fn get_one(
  State(repo): State<ContactRepository>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError> {
  let contact = repo
    .find_by_id(&id)
    .await
    .map_err(ApiError::from_repo("Error retrieving contact"))?
    .ok_or(ApiError::NotFound)?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts` — returns 201 + the store-assigned id.
#[utoipa::path(
  post,
  path = "/contacts",
  tag = "Contacts",
  summary = "Create a new contact",
  request_body = ContactFields,
  responses(
    (status = 201, description = "Contact created successfully", body = CreatedBody),
    (status = 400, description = "A required field is missing", body = ErrorBody),
    (status = 500, description = "Store failure", body = ErrorBody),
  )
)]
pub async fn create(
  State(repo): State<ContactRepository>,
  payload: Result<Json<ContactFields>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(fields) = payload?;
  let contact_id = repo
    .create(fields)
    .await
    .map_err(ApiError::from_repo("Error creating contact"))?;
  Ok((
    StatusCode::CREATED,
    Json(CreatedBody {
      message: "Contact created successfully".to_owned(),
      contact_id,
    }),
  ))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/{id}` — replaces every field; omitted optional fields are
/// cleared.
#[utoipa::path(
  put,
  path = "/contacts/{id}",
  tag = "Contacts",
  summary = "Update a contact by ID",
  params(("id" = String, Path, description = "The contact ID")),
  request_body = ContactFields,
  responses(
    (status = 200, description = "Contact updated successfully", body = UpdatedBody),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Store failure, malformed ID or missing required field", body = ErrorBody),
  )
)]
pub async fn update(
  State(repo): State<ContactRepository>,
  Path(id): Path<String>,
  payload: Result<Json<ContactFields>, JsonRejection>,
) -> Result<Json<UpdatedBody>, ApiError> {
  let Json(fields) = payload?;
  let contact = repo
    .update_by_id(&id, fields)
    .await
    .map_err(ApiError::from_repo_update("Error updating contact"))?;
  Ok(Json(UpdatedBody {
    message: "Contact updated successfully".to_owned(),
    contact,
  }))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/{id}`
#[utoipa::path(
  delete,
  path = "/contacts/{id}",
  tag = "Contacts",
  summary = "Delete a contact by ID",
  params(("id" = String, Path, description = "The contact ID")),
  responses(
    (status = 200, description = "Contact deleted successfully", body = DeletedBody),
    (status = 404, description = "Contact not found", body = ErrorBody),
    (status = 500, description = "Store failure or malformed ID", body = ErrorBody),
  )
)]
pub async fn delete(
  State(repo): State<ContactRepository>,
  Path(id): Path<String>,
) -> Result<Json<DeletedBody>, ApiError> {
  let contact_id = repo
    .delete_by_id(&id)
    .await
    .map_err(ApiError::from_repo("Error deleting contact"))?;
  Ok(Json(DeletedBody {
    message: "Contact deleted successfully".to_owned(),
    contact_id,
  }))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use async_trait::async_trait;
  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use contacts_core::{ContactStore, MemoryStore};
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use super::*;
  use crate::contacts_router;

  fn app() -> Router {
    contacts_router(ContactRepository::new(Arc::new(MemoryStore::new())))
  }

  async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app
      .clone()
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
  }

  fn john() -> Value {
    json!({ "firstName": "John", "lastName": "Doe", "email": "john@example.com" })
  }

  // ── Full lifecycle ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_get_update_delete_roundtrip() {
    let app = app();

    let (status, body) = send(&app, "POST", "/contacts", Some(john())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Contact created successfully");
    let id = body["contactId"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id.as_str());
    assert_eq!(body["firstName"], "John");

    let mut update = john();
    update["favoriteColor"] = json!("Red");
    let (status, body) =
      send(&app, "PUT", &format!("/contacts/{id}"), Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact updated successfully");
    assert_eq!(body["contact"]["favoriteColor"], "Red");
    assert_eq!(body["contact"]["_id"], id.as_str());

    let (_, body) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(body["favoriteColor"], "Red");
    assert_eq!(body["lastName"], "Doe");

    let (status, body) = send(&app, "DELETE", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Contact deleted successfully");
    assert_eq!(body["contactId"], id.as_str());

    let (status, body) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Contact not found");
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_all_contacts() {
    let app = app();
    let (status, body) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    send(&app, "POST", "/contacts", Some(john())).await;
    send(
      &app,
      "POST",
      "/contacts",
      Some(json!({ "firstName": "Ada", "lastName": "Williams", "email": "ada@example.com" })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c["firstName"].as_str().unwrap())
      .collect();
    assert_eq!(names, ["John", "Ada"]);
  }

  // ── Create validation ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_missing_required_field_returns_400_and_persists_nothing() {
    let app = app();
    for field in ["firstName", "lastName", "email"] {
      let mut body = john();
      body.as_object_mut().unwrap().remove(field);
      let (status, resp) = send(&app, "POST", "/contacts", Some(body)).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "missing {field}");
      assert_eq!(resp["message"], "firstName, lastName, and email are required");
    }

    let mut empty = john();
    empty["email"] = json!("");
    let (status, _) = send(&app, "POST", "/contacts", Some(empty)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, list) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  #[tokio::test]
  async fn create_with_malformed_json_is_rejected() {
    let app = app();
    let req = Request::builder()
      .method("POST")
      .uri("/contacts")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert!(resp.status().is_client_error());

    let (_, list) = send(&app, "GET", "/contacts", None).await;
    assert_eq!(list, json!([]));
  }

  // ── Not found ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn unknown_id_returns_404_for_get_put_delete() {
    let app = app();
    let uri = format!("/contacts/{}", ContactId::generate());

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", &uri, Some(john())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn malformed_id_returns_opaque_500() {
    let app = app();
    let (status, body) = send(&app, "GET", "/contacts/not-an-id", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "Error retrieving contact", "error": "storage" }));
  }

  // ── Update semantics ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn update_clears_omitted_optional_fields() {
    let app = app();
    let mut create = john();
    create["birthday"] = json!("1995-06-15");
    let (_, body) = send(&app, "POST", "/contacts", Some(create)).await;
    let id = body["contactId"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, "PUT", &format!("/contacts/{id}"), Some(john())).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["contact"].get("birthday").is_none());
  }

  #[tokio::test]
  async fn update_missing_required_field_returns_500() {
    let app = app();
    let (_, body) = send(&app, "POST", "/contacts", Some(john())).await;
    let id = body["contactId"].as_str().unwrap().to_owned();

    let (status, resp) = send(
      &app,
      "PUT",
      &format!("/contacts/{id}"),
      Some(json!({ "favoriteColor": "Red" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      resp,
      json!({ "message": "Error updating contact", "error": "validation" })
    );

    let (_, body) = send(&app, "GET", &format!("/contacts/{id}"), None).await;
    assert_eq!(body["firstName"], "John");
    assert!(body.get("favoriteColor").is_none());
  }

  #[tokio::test]
  async fn update_unknown_id_with_invalid_body_returns_404() {
    let app = app();
    let (status, body) = send(
      &app,
      "PUT",
      &format!("/contacts/{}", ContactId::generate()),
      Some(json!({ "favoriteColor": "Red" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Contact not found" }));
  }

  // ── Store failures ──────────────────────────────────────────────────────────

  struct BrokenStore;

  #[derive(Debug, thiserror::Error)]
  #[error("connection refused (secret detail)")]
  struct Refused;

  #[async_trait]
  impl ContactStore for BrokenStore {
    async fn find_all(&self) -> contacts_core::Result<Vec<Contact>> {
      Err(contacts_core::Error::storage(Refused))
    }
    async fn find_by_id(
      &self,
      _id: ContactId,
    ) -> contacts_core::Result<Option<Contact>> {
      Err(contacts_core::Error::storage(Refused))
    }
    async fn insert(&self, _c: Contact) -> contacts_core::Result<()> {
      Err(contacts_core::Error::storage(Refused))
    }
    async fn replace(&self, _c: Contact) -> contacts_core::Result<bool> {
      Err(contacts_core::Error::storage(Refused))
    }
    async fn remove(
      &self,
      _id: ContactId,
    ) -> contacts_core::Result<Option<Contact>> {
      Err(contacts_core::Error::storage(Refused))
    }
    async fn remove_all(&self) -> contacts_core::Result<usize> {
      Err(contacts_core::Error::storage(Refused))
    }
  }

  #[tokio::test]
  async fn store_failures_map_to_500_without_leaking_detail() {
    let app = contacts_router(ContactRepository::new(Arc::new(BrokenStore)));
    let uri = format!("/contacts/{}", ContactId::generate());

    let cases = [
      ("GET", "/contacts".to_owned(), None, "Error retrieving contacts"),
      ("GET", uri.clone(), None, "Error retrieving contact"),
      ("POST", "/contacts".to_owned(), Some(john()), "Error creating contact"),
      ("PUT", uri.clone(), Some(john()), "Error updating contact"),
      ("DELETE", uri, None, "Error deleting contact"),
    ];

    for (method, uri, body, message) in cases {
      let (status, resp) = send(&app, method, &uri, body).await;
      assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{method} {uri}");
      assert_eq!(resp, json!({ "message": message, "error": "storage" }));
      assert!(!resp.to_string().contains("secret"));
    }
  }

  #[tokio::test]
  async fn validation_wins_over_broken_store() {
    let app = contacts_router(ContactRepository::new(Arc::new(BrokenStore)));
    let (status, _) =
      send(&app, "POST", "/contacts", Some(json!({ "firstName": "John" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
