//! Collaborator traits for the hosted backend.
//!
//! Every remote dependency is reached through one of these traits so that
//! the process entry point owns client lifecycles and tests can substitute
//! in-memory fakes.

pub mod auth;
pub mod document_store;
pub mod generator;
pub mod object_store;

pub use auth::{AuthProvider, AuthUser, ProfileFields};
pub use document_store::{DocumentStore, DocumentSubscription};
pub use generator::{GenerateQuestionsRequest, GeneratedQuestion, QuestionGenerator};
pub use object_store::{ObjectStore, UploadEvent, UploadHandle};
