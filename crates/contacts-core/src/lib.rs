//! Core types and trait definitions for the contacts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; storage backends plug in through
//! [`store::ContactStore`].

pub mod contact;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

pub use contact::{Contact, ContactFields, ContactId, ValidFields};
pub use error::{Error, ErrorKind, Result};
pub use memory::MemoryStore;
pub use repository::ContactRepository;
pub use store::ContactStore;
