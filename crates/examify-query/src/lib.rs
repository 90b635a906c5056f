//! # examify-query
//!
//! The document access layer: cached one-shot reads, subscribed reads,
//! and mutations with cache invalidation, all parameterized by
//! [`QueryDescriptor`]s.

pub mod cache;
pub mod client;
pub mod descriptor;
pub mod keys;
pub mod state;
pub mod watch;

pub use client::{MutationOp, MutationOutcome, MutationRequest, QueryClient};
pub use descriptor::{QueryDescriptor, QuerySource};
pub use state::QueryState;
pub use watch::DocumentWatch;
