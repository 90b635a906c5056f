//! # examify-store
//!
//! [`DocumentStore`](examify_core::traits::DocumentStore) implementations:
//! a complete in-process store with real-time subscription fan-out, and a
//! thin REST client for the hosted backend.

pub mod memory;
pub mod rest;

pub use memory::MemoryDocumentStore;
pub use rest::RestDocumentStore;
