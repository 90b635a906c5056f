//! Cross-crate integration tests for the Examify data layer.

mod helpers;

mod audit_test;
mod query_test;
mod service_test;
mod upload_test;
