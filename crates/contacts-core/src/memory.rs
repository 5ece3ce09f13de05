//! [`MemoryStore`] — a process-local [`ContactStore`] for tests and
//! throwaway instances.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::{
  contact::{Contact, ContactId},
  error::{Error, Result},
  store::ContactStore,
};

/// Records live in a `Vec`, so iteration order is insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
  records: RwLock<Vec<Contact>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

#[derive(Debug, thiserror::Error)]
#[error("memory store lock poisoned")]
struct Poisoned;

fn poisoned<T>(_: PoisonError<T>) -> Error { Error::storage(Poisoned) }

#[async_trait]
impl ContactStore for MemoryStore {
  async fn find_all(&self) -> Result<Vec<Contact>> {
    Ok(self.records.read().map_err(poisoned)?.clone())
  }

  async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>> {
    let records = self.records.read().map_err(poisoned)?;
    Ok(records.iter().find(|c| c.id == id).cloned())
  }

  async fn insert(&self, contact: Contact) -> Result<()> {
    self.records.write().map_err(poisoned)?.push(contact);
    Ok(())
  }

  async fn replace(&self, contact: Contact) -> Result<bool> {
    let mut records = self.records.write().map_err(poisoned)?;
    match records.iter_mut().find(|c| c.id == contact.id) {
      Some(slot) => {
        *slot = contact;
        Ok(true)
      }
      None => Ok(false),
    }
  }

  async fn remove(&self, id: ContactId) -> Result<Option<Contact>> {
    let mut records = self.records.write().map_err(poisoned)?;
    Ok(
      records
        .iter()
        .position(|c| c.id == id)
        .map(|idx| records.remove(idx)),
    )
  }

  async fn remove_all(&self) -> Result<usize> {
    let mut records = self.records.write().map_err(poisoned)?;
    let n = records.len();
    records.clear();
    Ok(n)
  }
}
