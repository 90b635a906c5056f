//! Object store trait for pluggable blob storage backends.

use std::fmt;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::result::AppResult;

/// An event emitted by an in-flight resumable upload.
#[derive(Debug, Clone)]
pub enum UploadEvent {
    /// A progress tick mirroring the transport's reporting.
    Progress {
        /// Bytes transferred so far.
        bytes_transferred: u64,
        /// Total bytes to transfer.
        total_bytes: u64,
    },
    /// The transfer finished and the object is stored.
    Complete,
    /// The transfer failed; the upload cannot be resumed.
    Failed(AppError),
}

/// Handle to an in-flight upload, yielding [`UploadEvent`]s in order.
pub struct UploadHandle {
    events: mpsc::UnboundedReceiver<UploadEvent>,
}

impl UploadHandle {
    /// Wrap an event receiver.
    pub fn new(events: mpsc::UnboundedReceiver<UploadEvent>) -> Self {
        Self { events }
    }

    /// Wait for the next event. Returns `None` once the transport has
    /// closed the stream.
    pub async fn next(&mut self) -> Option<UploadEvent> {
        self.events.recv().await
    }
}

impl fmt::Debug for UploadHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadHandle").finish()
    }
}

/// Trait for blob storage backends.
///
/// The transfer contract does not expose mid-transfer cancellation;
/// callers cancel only by discarding interest in the handle.
#[async_trait]
pub trait ObjectStore: Send + Sync + fmt::Debug + 'static {
    /// Return the backend type name (e.g., "memory", "local").
    fn provider_type(&self) -> &str;

    /// Check whether the backend is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Start a resumable upload of `data` to `path` and return a handle
    /// observing its progress.
    async fn upload(&self, path: &str, data: Bytes) -> AppResult<UploadHandle>;

    /// Resolve the externally-addressable URL of a stored object.
    async fn download_url(&self, path: &str) -> AppResult<String>;

    /// Delete a stored object.
    async fn delete_object(&self, path: &str) -> AppResult<()>;

    /// Check whether an object exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;

    /// Map an URL previously issued by [`Self::download_url`] back to the
    /// object path it addresses.
    fn path_from_url(&self, url: &str) -> AppResult<String>;
}
