//! Upload controller — explicit state machine over resumable transfers.

use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::watch;
use tracing::{info, warn};

use examify_core::config::storage::ObjectStorageConfig;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::object_store::{ObjectStore, UploadEvent};

/// Lifecycle state of the current upload session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    /// No upload has been started.
    Idle,
    /// A transfer is in flight.
    Uploading,
    /// The last transfer completed and a URL was resolved.
    Success,
    /// The last transfer failed.
    Error,
}

/// Observable status of the controller's current upload session.
///
/// Terminal sessions (`Success`, `Error`) never transition; they are
/// replaced wholesale when a new upload starts.
#[derive(Debug, Clone)]
pub struct UploadStatus {
    /// Lifecycle state.
    pub state: UploadState,
    /// Percentage transferred; `None` after a failure.
    pub progress: Option<f64>,
    /// Resolved URL, set only on success.
    pub url: Option<String>,
    /// Failure, set only on error (or by a best-effort deletion).
    pub error: Option<AppError>,
}

impl UploadStatus {
    fn idle() -> Self {
        Self {
            state: UploadState::Idle,
            progress: None,
            url: None,
            error: None,
        }
    }
}

/// Wraps resumable uploads into an observable state machine.
///
/// Progress mirrors the transport's reporting; completion resolves the
/// object's externally-addressable URL. Failures are terminal — there is
/// no automatic retry.
#[derive(Debug)]
pub struct UploadController {
    store: Arc<dyn ObjectStore>,
    status: watch::Sender<UploadStatus>,
    max_upload_size_bytes: u64,
}

impl UploadController {
    /// Create a controller over an object store.
    pub fn new(store: Arc<dyn ObjectStore>, config: &ObjectStorageConfig) -> Self {
        let (status, _) = watch::channel(UploadStatus::idle());
        Self {
            store,
            status,
            max_upload_size_bytes: config.max_upload_size_bytes,
        }
    }

    /// Subscribe to status updates for the current and future sessions.
    pub fn status(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    /// Upload `data` to `destination` and return the resolved URL.
    ///
    /// Starting an upload replaces any previous session: progress resets
    /// to zero and prior error/URL state is cleared.
    pub async fn upload_file(&self, destination: &str, data: Bytes) -> AppResult<String> {
        if data.len() as u64 > self.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size_bytes
            )));
        }

        self.status.send_replace(UploadStatus {
            state: UploadState::Uploading,
            progress: Some(0.0),
            url: None,
            error: None,
        });

        let mut handle = match self.store.upload(destination, data).await {
            Ok(handle) => handle,
            Err(error) => return Err(self.fail(error)),
        };

        loop {
            match handle.next().await {
                Some(UploadEvent::Progress {
                    bytes_transferred,
                    total_bytes,
                }) => {
                    let progress = if total_bytes == 0 {
                        100.0
                    } else {
                        bytes_transferred as f64 / total_bytes as f64 * 100.0
                    };
                    self.status.send_modify(|status| {
                        status.progress = Some(progress);
                    });
                }
                Some(UploadEvent::Complete) => break,
                Some(UploadEvent::Failed(error)) => return Err(self.fail(error)),
                None => {
                    return Err(self.fail(AppError::transport(
                        "Transfer ended without completing",
                    )));
                }
            }
        }

        // The object is stored, but without a resolvable URL it is
        // unusable; URL resolution failure is an upload failure.
        let url = match self.store.download_url(destination).await {
            Ok(url) => url,
            Err(error) => return Err(self.fail(error)),
        };

        self.status.send_replace(UploadStatus {
            state: UploadState::Success,
            progress: Some(100.0),
            url: Some(url.clone()),
            error: None,
        });
        info!(destination, "Upload complete");
        Ok(url)
    }

    /// Best-effort deletion of a previously uploaded object.
    ///
    /// Failures are recorded in status and logged for operators, never
    /// returned: cleanup must not abort the caller's flow.
    pub async fn delete_file(&self, url: &str) {
        let result = match self.store.path_from_url(url) {
            Ok(path) => self.store.delete_object(&path).await,
            Err(error) => Err(error),
        };
        if let Err(error) = result {
            warn!(url, %error, "Failed to delete uploaded object");
            self.status.send_modify(|status| {
                status.error = Some(error);
            });
        }
    }

    fn fail(&self, error: AppError) -> AppError {
        self.status.send_replace(UploadStatus {
            state: UploadState::Error,
            progress: None,
            url: None,
            error: Some(error.clone()),
        });
        error
    }
}
