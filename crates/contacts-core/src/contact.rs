//! The contact record schema.
//!
//! [`Contact`] is the persisted shape. [`ContactFields`] is what a client
//! submits; it only becomes storable after [`ContactFields::validate`].

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Message returned whenever a required field is missing or empty.
pub const REQUIRED_FIELDS_MESSAGE: &str =
  "firstName, lastName, and email are required";

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Store-assigned contact identifier. Clients never supply one on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  /// Mint a fresh identifier. Only stores should call this.
  pub fn generate() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for ContactId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Uuid::parse_str(s)
      .map(Self)
      .map_err(|_| Error::MalformedId(s.to_owned()))
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A persisted contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  /// The auto-generated id of the contact.
  #[serde(rename = "_id")]
  #[schema(value_type = String, format = Uuid)]
  pub id:             ContactId,
  pub first_name:     String,
  pub last_name:      String,
  pub email:          String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub favorite_color: Option<String>,
  /// Date-like text, e.g. `1995-06-15`. Not parsed.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub birthday:       Option<String>,
}

// ─── Client input ────────────────────────────────────────────────────────────

/// Request body for create and update.
///
/// Every field is optional on the wire so that presence can be checked
/// explicitly; see [`ContactFields::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
  #[schema(required = true, example = "John")]
  pub first_name:     Option<String>,
  #[schema(required = true, example = "Doe")]
  pub last_name:      Option<String>,
  #[schema(required = true, example = "john@example.com")]
  pub email:          Option<String>,
  #[schema(example = "Blue")]
  pub favorite_color: Option<String>,
  #[schema(example = "1995-06-15")]
  pub birthday:       Option<String>,
}

impl ContactFields {
  /// Convenience constructor with the three required fields set.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    email: impl Into<String>,
  ) -> Self {
    Self {
      first_name: Some(first_name.into()),
      last_name: Some(last_name.into()),
      email: Some(email.into()),
      ..Self::default()
    }
  }

  /// Check that `firstName`, `lastName` and `email` are present and
  /// non-empty. Nothing else is inspected.
  pub fn validate(self) -> Result<ValidFields> {
    match (
      non_empty(self.first_name),
      non_empty(self.last_name),
      non_empty(self.email),
    ) {
      (Some(first_name), Some(last_name), Some(email)) => Ok(ValidFields {
        first_name,
        last_name,
        email,
        favorite_color: self.favorite_color,
        birthday: self.birthday,
      }),
      _ => Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_owned())),
    }
  }
}

fn non_empty(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

/// Fields that passed validation. The only way to build one outside this
/// module is [`ContactFields::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidFields {
  first_name:     String,
  last_name:      String,
  email:          String,
  favorite_color: Option<String>,
  birthday:       Option<String>,
}

impl ValidFields {
  /// Attach an identifier, producing a storable record.
  pub fn into_contact(self, id: ContactId) -> Contact {
    Contact {
      id,
      first_name: self.first_name,
      last_name: self.last_name,
      email: self.email,
      favorite_color: self.favorite_color,
      birthday: self.birthday,
    }
  }
}
