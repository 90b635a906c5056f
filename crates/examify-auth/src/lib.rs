//! # examify-auth
//!
//! [`AuthProvider`](examify_core::traits::AuthProvider) implementations.
//! The in-process provider holds the current-user handle for local
//! deployments and tests; a hosted identity backend would slot in behind
//! the same trait.

pub mod memory;

pub use memory::MemoryAuthProvider;
