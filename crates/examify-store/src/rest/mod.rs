//! REST client for the hosted document backend.

mod client;

pub use client::RestDocumentStore;
