//! OpenAPI document for the contacts API.
//!
//! Built from the `#[utoipa::path]` annotations on the handlers in
//! [`crate::contacts`], so the rendered docs describe the same operations the
//! router mounts.

use contacts_core::{Contact, ContactFields};
use utoipa::{OpenApi, openapi::Server};

use crate::{
  contacts::{self, CreatedBody, DeletedBody, UpdatedBody},
  error::ErrorBody,
};

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Contacts API",
    version = "1.0.0",
    description = "Create, read, update and delete contact records."
  ),
  paths(
    contacts::list,
    contacts::create,
    contacts::get_one,
    contacts::update,
    contacts::delete,
  ),
  components(schemas(
    Contact,
    ContactFields,
    CreatedBody,
    UpdatedBody,
    DeletedBody,
    ErrorBody,
  )),
  tags((name = "Contacts", description = "Contact records"))
)]
pub struct ApiDoc;

/// The OpenAPI document, with `base_url` as its only server when given.
pub fn openapi(base_url: Option<&str>) -> utoipa::openapi::OpenApi {
  let mut doc = ApiDoc::openapi();
  if let Some(url) = base_url {
    doc.servers = Some(vec![Server::new(url.trim_end_matches('/'))]);
  }
  doc
}
