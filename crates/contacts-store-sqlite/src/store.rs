//! [`SqliteStore`] — the SQLite implementation of [`ContactStore`].

use std::path::Path;

use async_trait::async_trait;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use contacts_core::{Contact, ContactId, ContactStore};

use crate::{schema::SCHEMA, Error, Result};

const SELECT_COLUMNS: &str =
  "SELECT contact_id, first_name, last_name, email, favorite_color, birthday FROM contacts";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A contacts store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: Connection,
}

#[derive(Clone)]
enum Connection {
  Open(tokio_rusqlite::Connection),
  Unavailable(String),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    Self::init(conn).await
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    Self::init(conn).await
  }

  /// Open a store from a connection string.
  ///
  /// Accepts `sqlite://<path>`, `sqlite:<path>`, `:memory:` and bare file
  /// paths. `sqlite::memory:` and `sqlite://:memory:` open an in-memory store.
  pub async fn connect(url: &str) -> Result<Self> {
    let path = url
      .strip_prefix("sqlite://")
      .or_else(|| url.strip_prefix("sqlite:"))
      .unwrap_or(url);

    if path == ":memory:" {
      Self::open_in_memory().await
    } else {
      Self::open(path).await
    }
  }

  /// A store with no connection. Every operation fails with
  /// [`Error::Unavailable`] carrying `reason`.
  pub fn unavailable(reason: impl Into<String>) -> Self {
    Self { conn: Connection::Unavailable(reason.into()) }
  }

  pub fn is_available(&self) -> bool {
    matches!(self.conn, Connection::Open(_))
  }

  /// Close the connection, flushing pending work. Other clones of this store
  /// fail after this returns.
  pub async fn close(self) -> Result<()> {
    if let Connection::Open(conn) = self.conn {
      conn.close().await?;
    }
    Ok(())
  }

  async fn init(conn: tokio_rusqlite::Connection) -> Result<Self> {
    conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("contacts schema initialised");
    Ok(Self { conn: Connection::Open(conn) })
  }

  fn conn(&self) -> Result<&tokio_rusqlite::Connection> {
    match &self.conn {
      Connection::Open(conn) => Ok(conn),
      Connection::Unavailable(reason) => Err(Error::Unavailable(reason.clone())),
    }
  }
}

// ─── Row mapping ─────────────────────────────────────────────────────────────

/// A contact row as read from SQLite, before the identifier is parsed.
struct RawContact {
  contact_id:     String,
  first_name:     String,
  last_name:      String,
  email:          String,
  favorite_color: Option<String>,
  birthday:       Option<String>,
}

impl RawContact {
  fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      contact_id:     row.get(0)?,
      first_name:     row.get(1)?,
      last_name:      row.get(2)?,
      email:          row.get(3)?,
      favorite_color: row.get(4)?,
      birthday:       row.get(5)?,
    })
  }

  fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:             ContactId::from(Uuid::parse_str(&self.contact_id)?),
      first_name:     self.first_name,
      last_name:      self.last_name,
      email:          self.email,
      favorite_color: self.favorite_color,
      birthday:       self.birthday,
    })
  }
}

fn insert_row(conn: &rusqlite::Connection, c: &Contact) -> rusqlite::Result<()> {
  conn.execute(
    "INSERT INTO contacts (
       contact_id, first_name, last_name, email, favorite_color, birthday
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    rusqlite::params![
      c.id.to_string(),
      c.first_name,
      c.last_name,
      c.email,
      c.favorite_color,
      c.birthday,
    ],
  )?;
  Ok(())
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl SqliteStore {
  async fn find_all_raw(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn()?
      .call(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  async fn find_by_id_raw(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = id.to_string();

    let raw: Option<RawContact> = self
      .conn()?
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("{SELECT_COLUMNS} WHERE contact_id = ?1"),
              rusqlite::params![id_str],
              RawContact::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn insert_raw(&self, contact: Contact) -> Result<()> {
    self
      .conn()?
      .call(move |conn| {
        insert_row(conn, &contact)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_many_raw(&self, contacts: Vec<Contact>) -> Result<()> {
    self
      .conn()?
      .call(move |conn| {
        let tx = conn.transaction()?;
        for c in &contacts {
          insert_row(&tx, c)?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn replace_raw(&self, contact: Contact) -> Result<bool> {
    let changed = self
      .conn()?
      .call(move |conn| {
        let n = conn.execute(
          "UPDATE contacts
              SET first_name = ?2, last_name = ?3, email = ?4,
                  favorite_color = ?5, birthday = ?6
            WHERE contact_id = ?1",
          rusqlite::params![
            contact.id.to_string(),
            contact.first_name,
            contact.last_name,
            contact.email,
            contact.favorite_color,
            contact.birthday,
          ],
        )?;
        Ok(n)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn remove_raw(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = id.to_string();

    let raw: Option<RawContact> = self
      .conn()?
      .call(move |conn| {
        let tx = conn.transaction()?;
        let raw = tx
          .query_row(
            &format!("{SELECT_COLUMNS} WHERE contact_id = ?1"),
            rusqlite::params![id_str],
            RawContact::from_row,
          )
          .optional()?;
        if raw.is_some() {
          tx.execute(
            "DELETE FROM contacts WHERE contact_id = ?1",
            rusqlite::params![id_str],
          )?;
        }
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn remove_all_raw(&self) -> Result<usize> {
    let n = self
      .conn()?
      .call(|conn| Ok(conn.execute("DELETE FROM contacts", [])?))
      .await?;
    Ok(n)
  }
}

#[async_trait]
impl ContactStore for SqliteStore {
  async fn find_all(&self) -> contacts_core::Result<Vec<Contact>> {
    Ok(self.find_all_raw().await?)
  }

  async fn find_by_id(
    &self,
    id: ContactId,
  ) -> contacts_core::Result<Option<Contact>> {
    Ok(self.find_by_id_raw(id).await?)
  }

  async fn insert(&self, contact: Contact) -> contacts_core::Result<()> {
    Ok(self.insert_raw(contact).await?)
  }

  async fn replace(&self, contact: Contact) -> contacts_core::Result<bool> {
    Ok(self.replace_raw(contact).await?)
  }

  async fn remove(&self, id: ContactId) -> contacts_core::Result<Option<Contact>> {
    Ok(self.remove_raw(id).await?)
  }

  async fn remove_all(&self) -> contacts_core::Result<usize> {
    Ok(self.remove_all_raw().await?)
  }

  async fn insert_many(&self, contacts: Vec<Contact>) -> contacts_core::Result<()> {
    Ok(self.insert_many_raw(contacts).await?)
  }
}
