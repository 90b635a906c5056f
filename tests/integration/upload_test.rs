//! Upload controller state machine behavior.

use std::sync::Arc;

use bytes::Bytes;

use examify::{UploadController, UploadState};
use examify_core::config::storage::ObjectStorageConfig;
use examify_core::traits::ObjectStore;
use examify_storage::MemoryObjectStore;

#[tokio::test]
async fn progress_is_non_decreasing_and_ends_at_100() {
    let store = Arc::new(MemoryObjectStore::new(4));
    let controller = Arc::new(UploadController::new(
        store,
        &ObjectStorageConfig::default(),
    ));
    let mut status = controller.status();

    let upload = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .upload_file("avatars/u1.png", Bytes::from_static(&[0u8; 16]))
                .await
        }
    });

    let mut observed = Vec::new();
    loop {
        status.changed().await.unwrap();
        let snapshot = status.borrow().clone();
        if let Some(progress) = snapshot.progress {
            observed.push(progress);
        }
        if matches!(snapshot.state, UploadState::Success | UploadState::Error) {
            break;
        }
    }

    let url = upload.await.unwrap().unwrap();
    assert_eq!(url, "memory://avatars/u1.png");
    for pair in observed.windows(2) {
        assert!(pair[0] <= pair[1]);
    }
    assert_eq!(observed.last().copied(), Some(100.0));
}

#[tokio::test]
async fn mid_transfer_failure_rejects_and_clears_progress() {
    let store = Arc::new(MemoryObjectStore::new(4).with_failure_at_byte(8));
    let controller = UploadController::new(store, &ObjectStorageConfig::default());

    let error = controller
        .upload_file("avatars/u1.png", Bytes::from_static(&[0u8; 16]))
        .await
        .unwrap_err();
    assert!(error.message.contains("aborted"));

    let status = controller.status().borrow().clone();
    assert_eq!(status.state, UploadState::Error);
    assert_eq!(status.progress, None);
    assert!(status.error.is_some());
    assert!(status.url.is_none());
}

#[tokio::test]
async fn deletion_failure_is_best_effort() {
    let store = Arc::new(MemoryObjectStore::new(4));
    let controller = UploadController::new(store.clone(), &ObjectStorageConfig::default());

    let url = controller
        .upload_file("files/a.bin", Bytes::from_static(&[1u8; 4]))
        .await
        .unwrap();

    // First deletion succeeds; the second records the error silently.
    controller.delete_file(&url).await;
    assert!(!store.exists("files/a.bin").await.unwrap());
    controller.delete_file(&url).await;
    let status = controller.status().borrow().clone();
    assert!(status.error.is_some());
}
