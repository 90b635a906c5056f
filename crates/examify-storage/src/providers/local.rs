//! Local filesystem object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::debug;

use examify_core::config::storage::ObjectStorageConfig;
use examify_core::error::{AppError, ErrorKind};
use examify_core::result::AppResult;
use examify_core::traits::object_store::{ObjectStore, UploadEvent, UploadHandle};

const URL_SCHEME: &str = "file://";

/// Local filesystem object store provider.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Root directory for all stored objects.
    root: PathBuf,
    /// Transfer chunk size; one progress tick per chunk.
    chunk_size: usize,
}

impl LocalObjectStore {
    /// Create a provider rooted at the configured path.
    pub async fn new(config: &ObjectStorageConfig) -> AppResult<Self> {
        let root = PathBuf::from(&config.local.root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            chunk_size: (config.chunk_size_bytes as usize).max(1),
        })
    }

    /// Resolve a relative object path to an absolute path within the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        if path.is_empty() || path.starts_with('/') {
            return Err(AppError::validation(format!(
                "'{path}' is not a valid object path"
            )));
        }
        if Path::new(path)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(AppError::validation(format!(
                "'{path}' escapes the storage root"
            )));
        }
        Ok(self.root.join(path))
    }

    async fn ensure_parent(path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn upload(&self, path: &str, data: Bytes) -> AppResult<UploadHandle> {
        let full_path = self.resolve(path)?;
        let (events, receiver) = mpsc::unbounded_channel();
        let chunk_size = self.chunk_size;
        let owned_path = path.to_string();

        tokio::spawn(async move {
            if let Err(e) = Self::ensure_parent(&full_path).await {
                let _ = events.send(UploadEvent::Failed(e));
                return;
            }
            let mut file = match fs::File::create(&full_path).await {
                Ok(file) => file,
                Err(e) => {
                    let _ = events.send(UploadEvent::Failed(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create file: {owned_path}"),
                        e,
                    )));
                    return;
                }
            };

            let total_bytes = data.len() as u64;
            let mut bytes_transferred = 0u64;
            let _ = events.send(UploadEvent::Progress {
                bytes_transferred,
                total_bytes,
            });

            for chunk in data.chunks(chunk_size) {
                if let Err(e) = file.write_all(chunk).await {
                    let _ = events.send(UploadEvent::Failed(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to write file: {owned_path}"),
                        e,
                    )));
                    return;
                }
                bytes_transferred += chunk.len() as u64;
                let _ = events.send(UploadEvent::Progress {
                    bytes_transferred,
                    total_bytes,
                });
            }

            if let Err(e) = file.flush().await {
                let _ = events.send(UploadEvent::Failed(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to flush file: {owned_path}"),
                    e,
                )));
                return;
            }

            debug!(path = owned_path, bytes = total_bytes, "Stored object");
            let _ = events.send(UploadEvent::Complete);
        });

        Ok(UploadHandle::new(receiver))
    }

    async fn download_url(&self, path: &str) -> AppResult<String> {
        let full_path = self.resolve(path)?;
        if !fs::try_exists(&full_path).await? {
            return Err(AppError::not_found(format!("Object not found: {path}")));
        }
        Ok(format!("{URL_SCHEME}{}", full_path.display()))
    }

    async fn delete_object(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        fs::remove_file(&full_path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Object not found: {path}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {path}"),
                    e,
                )
            }
        })
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        Ok(fs::try_exists(&full_path).await?)
    }

    fn path_from_url(&self, url: &str) -> AppResult<String> {
        let absolute = url.strip_prefix(URL_SCHEME).ok_or_else(|| {
            AppError::validation(format!("'{url}' was not issued by the local store"))
        })?;
        Path::new(absolute)
            .strip_prefix(&self.root)
            .map(|rel| rel.to_string_lossy().into_owned())
            .map_err(|_| {
                AppError::validation(format!("'{url}' is outside the storage root"))
            })
    }
}
