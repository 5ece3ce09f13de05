//! The `ContactStore` trait: the document-store primitives the repository is
//! built on.
//!
//! Implemented by storage backends (e.g. `contacts-store-sqlite`, or the
//! in-process [`MemoryStore`](crate::memory::MemoryStore)). A store persists
//! whatever it is handed; validation belongs to the
//! [`ContactRepository`](crate::repository::ContactRepository).
//!
//! The store is injected as an `Arc<dyn ContactStore>` and shared by every
//! in-flight request, so implementations must be safe for concurrent use.
//! Each call is atomic for a single record only.

use async_trait::async_trait;

use crate::{
  contact::{Contact, ContactId},
  error::Result,
};

#[async_trait]
pub trait ContactStore: Send + Sync {
  /// Every stored contact, in insertion order.
  async fn find_all(&self) -> Result<Vec<Contact>>;

  /// Returns `None` if no record has `id`.
  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>>;

  async fn insert(&self, contact: Contact) -> Result<()>;

  /// Overwrite the record with `contact.id`, keeping its position.
  /// Returns `false` if no such record exists.
  async fn replace(&self, contact: Contact) -> Result<bool>;

  /// Returns the removed record, or `None` if there was nothing to remove.
  async fn remove(&self, id: ContactId) -> Result<Option<Contact>>;

  /// Unconditionally delete every record. Returns the number removed.
  async fn remove_all(&self) -> Result<usize>;

  async fn insert_many(&self, contacts: Vec<Contact>) -> Result<()> {
    for contact in contacts {
      self.insert(contact).await?;
    }
    Ok(())
  }
}
