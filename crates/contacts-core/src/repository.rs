//! [`ContactRepository`] — the sole boundary between route handlers and
//! persistent storage.
//!
//! Identifiers arrive as raw strings straight from the request path. A string
//! that is not a valid [`ContactId`] fails with [`Error::MalformedId`], which
//! callers see as a storage failure.

use std::sync::Arc;

use tracing::debug;

use crate::{
  contact::{Contact, ContactFields, ContactId},
  error::{Error, Result},
  store::ContactStore,
};

/// Cloning is cheap; all clones share one store handle.
#[derive(Clone)]
pub struct ContactRepository {
  store: Arc<dyn ContactStore>,
}

impl ContactRepository {
  pub fn new(store: Arc<dyn ContactStore>) -> Self { Self { store } }

  /// Every stored contact, in insertion order. Unbounded.
  pub async fn list_all(&self) -> Result<Vec<Contact>> {
    self.store.find_all().await
  }

  /// `Ok(None)` means no record has that identifier.
  pub async fn find_by_id(&self, id: &str) -> Result<Option<Contact>> {
    let id: ContactId = id.parse()?;
    self.store.find_by_id(id).await
  }

  /// Validate `fields` and persist a new record with a store-assigned id.
  pub async fn create(&self, fields: ContactFields) -> Result<ContactId> {
    let valid = fields.validate()?;
    let id = ContactId::generate();
    self.store.insert(valid.into_contact(id)).await?;
    debug!(%id, "contact created");
    Ok(id)
  }

  /// Replace all five fields of the record at `id`.
  ///
  /// A missing record fails with [`Error::NotFound`] before `fields` is
  /// looked at. Optional fields absent from `fields` are cleared, not kept.
  pub async fn update_by_id(
    &self,
    id: &str,
    fields: ContactFields,
  ) -> Result<Contact> {
    let id: ContactId = id.parse()?;
    if self.store.find_by_id(id).await?.is_none() {
      return Err(Error::NotFound(id));
    }
    let contact = fields.validate()?.into_contact(id);
    // The record may have been removed since the lookup.
    if !self.store.replace(contact.clone()).await? {
      return Err(Error::NotFound(id));
    }
    debug!(%id, "contact updated");
    Ok(contact)
  }

  /// Permanently remove the record at `id`, returning its identifier.
  pub async fn delete_by_id(&self, id: &str) -> Result<ContactId> {
    let id: ContactId = id.parse()?;
    let removed = self.store.remove(id).await?.ok_or(Error::NotFound(id))?;
    debug!(%id, "contact deleted");
    Ok(removed.id)
  }

  /// Drop every record and insert `fields` in order. Maintenance only; not
  /// reachable over HTTP.
  ///
  /// All records are validated before anything is deleted. Returns the number
  /// of records inserted.
  pub async fn reset(&self, fields: Vec<ContactFields>) -> Result<usize> {
    let contacts = fields
      .into_iter()
      .map(|f| Ok(f.validate()?.into_contact(ContactId::generate())))
      .collect::<Result<Vec<_>>>()?;
    let n = contacts.len();

    let removed = self.store.remove_all().await?;
    debug!(removed, "contacts cleared");
    self.store.insert_many(contacts).await?;
    Ok(n)
  }
}
