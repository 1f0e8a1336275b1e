//! Typed HTTP client for an Appwrite-compatible backend.
//!
//! Covers the slice of the platform REST surface this workspace talks to:
//! account and session management, document CRUD with query support, and
//! bucket file storage. Build one [`Appwrite`] handle per project and hand
//! clones of it to the per-resource services ([`Account`], [`Databases`],
//! [`Storage`]).

pub mod account;
pub mod client;
pub mod databases;
pub mod error;
pub mod id;
pub mod models;
pub mod permission;
pub mod query;
pub mod storage;

pub use account::Account;
pub use client::Appwrite;
pub use databases::Databases;
pub use error::{Error, Result};
pub use models::{Document, DocumentList, Session, StoredFile, User};
pub use permission::{Permission, Role};
pub use query::Query;
pub use storage::Storage;
