//! # examify-storage
//!
//! The upload controller and
//! [`ObjectStore`](examify_core::traits::ObjectStore) implementations.

pub mod providers;
pub mod uploader;

pub use providers::local::LocalObjectStore;
pub use providers::memory::MemoryObjectStore;
pub use uploader::{UploadController, UploadState, UploadStatus};
