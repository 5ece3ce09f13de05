//! SQL schema for the contacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per contact document. `seq` only exists to give a stable
-- insertion order; the public identifier is `contact_id`.
CREATE TABLE IF NOT EXISTS contacts (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id      TEXT    NOT NULL UNIQUE,
    first_name      TEXT    NOT NULL,
    last_name       TEXT    NOT NULL,
    email           TEXT    NOT NULL,
    favorite_color  TEXT,
    birthday        TEXT
);

PRAGMA user_version = 1;
";
