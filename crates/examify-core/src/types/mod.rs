//! Shared types: document paths, cache keys, and document values.

pub mod document;
pub mod path;
pub mod query_key;

pub use document::{Document, is_server_timestamp, server_timestamp};
pub use path::{CollectionPath, DocumentPath};
pub use query_key::{KeyPart, QueryKey};
