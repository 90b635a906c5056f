//! # examify
//!
//! Facade crate for the Examify data layer. Wires the document store,
//! query client, audit logger, upload controller, and services from a
//! single configuration, with lifecycle owned by the process entry point.

pub mod app;
pub mod logging;

pub use app::{AppContext, AppContextBuilder};

pub use examify_audit::ActivityLogger;
pub use examify_core::config::AppConfig;
pub use examify_core::error::{AppError, ErrorKind};
pub use examify_core::result::AppResult;
pub use examify_query::{QueryClient, QueryDescriptor, QueryState};
pub use examify_storage::{UploadController, UploadState, UploadStatus};
