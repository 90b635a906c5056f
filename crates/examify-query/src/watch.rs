//! Subscribed document reads.

use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use examify_core::error::AppError;
use examify_core::result::AppResult;

use crate::client::QueryClient;
use crate::descriptor::{QueryDescriptor, QuerySource};
use crate::state::{QueryState, decode_document};

/// A live view of a single document.
///
/// The state updates for the lifetime of the caller's interest whenever
/// the underlying document changes. Dropping the watch tears the
/// subscription down exactly once; watches of the same path are
/// independent and never interfere with one another.
pub struct DocumentWatch<T> {
    receiver: watch::Receiver<QueryState<T>>,
    // Kept alive for disabled watches, which have no task.
    _idle_sender: Option<watch::Sender<QueryState<T>>>,
    _task: WatchTaskGuard,
}

impl<T: Clone> DocumentWatch<T> {
    /// The most recently observed state.
    pub fn current(&self) -> QueryState<T> {
        self.receiver.borrow().clone()
    }

    /// Wait until the state changes from the last one seen.
    pub async fn changed(&mut self) -> AppResult<()> {
        self.receiver
            .changed()
            .await
            .map_err(|_| AppError::internal("Document watch ended"))
    }

    /// Wait for the next state change and return it.
    pub async fn next(&mut self) -> AppResult<QueryState<T>> {
        self.changed().await?;
        Ok(self.current())
    }
}

struct WatchTaskGuard {
    handle: Option<JoinHandle<()>>,
}

impl Drop for WatchTaskGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl QueryClient {
    /// Subscribed read of a single document.
    ///
    /// The subscription is registered before the initial read so no
    /// change between the two can be missed. Every observed state is
    /// written through to the query cache so later one-shot reads under
    /// the same key see fresh data.
    pub async fn watch_document<T>(
        &self,
        descriptor: &QueryDescriptor,
    ) -> AppResult<DocumentWatch<T>>
    where
        T: DeserializeOwned + Clone + Send + Sync + 'static,
    {
        if !descriptor.listen {
            return Err(AppError::validation(
                "watch_document requires a listening descriptor",
            ));
        }
        let QuerySource::Document(path) = &descriptor.source else {
            return Err(AppError::validation(
                "Only single documents support listening",
            ));
        };

        if !descriptor.enabled {
            let (sender, receiver) = watch::channel(QueryState::idle());
            return Ok(DocumentWatch {
                receiver,
                _idle_sender: Some(sender),
                _task: WatchTaskGuard { handle: None },
            });
        }

        let mut subscription = self.store().subscribe(path).await?;
        let (sender, receiver) = watch::channel(QueryState::loading());

        let client = self.clone();
        let path = path.clone();
        let key = descriptor.key.clone();
        let handle = tokio::spawn(async move {
            let initial = match client.store().get(&path).await {
                Ok(doc) => {
                    client.cache_document(&key, &doc).await;
                    decode_document(doc)
                }
                Err(error) => QueryState::failed(error),
            };
            sender.send_replace(initial);

            while let Some(change) = subscription.next().await {
                client.cache_document(&key, &change).await;
                sender.send_replace(decode_document(change));
            }
        });

        Ok(DocumentWatch {
            receiver,
            _idle_sender: None,
            _task: WatchTaskGuard {
                handle: Some(handle),
            },
        })
    }
}
