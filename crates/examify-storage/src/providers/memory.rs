//! In-memory object store.
//!
//! Backs tests and local deployments. Transfers are chunked so that
//! progress reporting behaves like a real resumable upload; a failure
//! byte offset can be injected to exercise mid-transfer error paths.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;
use tokio::sync::mpsc;

use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::object_store::{ObjectStore, UploadEvent, UploadHandle};

const URL_SCHEME: &str = "memory://";

/// In-memory object store provider.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    /// Object path → contents.
    objects: Arc<DashMap<String, Bytes>>,
    /// Transfer chunk size; one progress tick per chunk.
    chunk_size: usize,
    /// Byte offset at which transfers fail, if injected.
    fail_at_byte: Option<u64>,
}

impl MemoryObjectStore {
    /// Create a store emitting one progress tick per `chunk_size` bytes.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
            chunk_size: chunk_size.max(1),
            fail_at_byte: None,
        }
    }

    /// Make every transfer fail once `offset` bytes have been moved.
    pub fn with_failure_at_byte(mut self, offset: u64) -> Self {
        self.fail_at_byte = Some(offset);
        self
    }

    fn validate_path(path: &str) -> AppResult<()> {
        if path.is_empty() || path.starts_with('/') || path.split('/').any(|s| s.is_empty()) {
            return Err(AppError::validation(format!(
                "'{path}' is not a valid object path"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, path: &str, data: Bytes) -> AppResult<UploadHandle> {
        Self::validate_path(path)?;
        let (events, receiver) = mpsc::unbounded_channel();
        let objects = Arc::clone(&self.objects);
        let chunk_size = self.chunk_size;
        let fail_at_byte = self.fail_at_byte;
        let owned_path = path.to_string();

        tokio::spawn(async move {
            let total_bytes = data.len() as u64;
            let mut bytes_transferred = 0u64;
            let _ = events.send(UploadEvent::Progress {
                bytes_transferred,
                total_bytes,
            });

            for chunk in data.chunks(chunk_size) {
                if let Some(offset) = fail_at_byte {
                    if bytes_transferred >= offset {
                        let _ = events.send(UploadEvent::Failed(AppError::storage(format!(
                            "Transfer aborted after {bytes_transferred} bytes"
                        ))));
                        return;
                    }
                }
                bytes_transferred += chunk.len() as u64;
                let _ = events.send(UploadEvent::Progress {
                    bytes_transferred,
                    total_bytes,
                });
                tokio::task::yield_now().await;
            }

            objects.insert(owned_path, data);
            let _ = events.send(UploadEvent::Complete);
        });

        Ok(UploadHandle::new(receiver))
    }

    async fn download_url(&self, path: &str) -> AppResult<String> {
        if !self.objects.contains_key(path) {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        Ok(format!("{URL_SCHEME}{path}"))
    }

    async fn delete_object(&self, path: &str) -> AppResult<()> {
        if self.objects.remove(path).is_none() {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        Ok(())
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        Ok(self.objects.contains_key(path))
    }

    fn path_from_url(&self, url: &str) -> AppResult<String> {
        url.strip_prefix(URL_SCHEME)
            .map(str::to_string)
            .ok_or_else(|| {
                AppError::validation(format!("'{url}' was not issued by the memory store"))
            })
    }
}
