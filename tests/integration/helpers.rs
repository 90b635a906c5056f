//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use examify::{AppConfig, AppContext};
use examify_auth::MemoryAuthProvider;
use examify_core::result::AppResult;
use examify_core::traits::auth::AuthUser;
use examify_core::traits::document_store::{DocumentStore, DocumentSubscription};
use examify_core::traits::generator::{
    GenerateQuestionsRequest, GeneratedQuestion, QuestionGenerator,
};
use examify_core::types::document::Document;
use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_storage::MemoryObjectStore;
use examify_store::MemoryDocumentStore;

/// Test application context with direct handles to the fakes.
pub struct TestApp {
    /// The fully wired context.
    pub ctx: AppContext,
    /// Direct handle to the document store.
    pub store: Arc<MemoryDocumentStore>,
    /// Direct handle to the object store.
    pub objects: Arc<MemoryObjectStore>,
    /// Direct handle to the auth provider.
    pub auth: Arc<MemoryAuthProvider>,
}

/// Build a test application over in-memory collaborators.
pub async fn test_app() -> TestApp {
    test_app_with_config(AppConfig::default()).await
}

/// Build a test application with a custom configuration.
pub async fn test_app_with_config(config: AppConfig) -> TestApp {
    let store = Arc::new(MemoryDocumentStore::new());
    let objects = Arc::new(MemoryObjectStore::new(4 * 1024));
    let auth = Arc::new(MemoryAuthProvider::new());
    let ctx = AppContext::builder(config)
        .with_store(store.clone())
        .with_objects(objects.clone())
        .with_auth(auth.clone())
        .build()
        .await
        .expect("Failed to build test context");
    TestApp {
        ctx,
        store,
        objects,
        auth,
    }
}

/// A signed-in test user.
pub async fn sign_in(app: &TestApp) -> AuthUser {
    let user = AuthUser {
        uid: "u1".to_string(),
        display_name: Some("Alex".to_string()),
        email: Some("alex@example.com".to_string()),
        photo_url: None,
    };
    app.auth.sign_in(user.clone()).await;
    user
}

/// Write a raw document into the store.
pub async fn put_doc(store: &MemoryDocumentStore, path: &str, value: serde_json::Value) {
    let path = DocumentPath::parse(path).unwrap();
    let doc = value.as_object().cloned().expect("document must be an object");
    store.set(&path, doc).await.unwrap();
}

/// Number of documents in a collection.
pub async fn collection_len(store: &MemoryDocumentStore, collection: &str) -> usize {
    let collection = CollectionPath::parse(collection).unwrap();
    store.list(&collection).await.unwrap().len()
}

/// Poll `predicate` until it holds or a second elapses.
pub async fn wait_until(mut predicate: impl FnMut() -> bool) {
    for _ in 0..200 {
        if predicate() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}

/// Document store wrapper counting read traffic.
#[derive(Debug)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    reads: AtomicU64,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            reads: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryDocumentStore {
        &self.inner
    }

    /// Number of read requests (gets and lists) issued to the store.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    fn provider_type(&self) -> &str {
        "counting"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get(path).await
    }

    async fn list(
        &self,
        collection: &CollectionPath,
    ) -> AppResult<Vec<(DocumentPath, Document)>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list(collection).await
    }

    async fn set(&self, path: &DocumentPath, doc: Document) -> AppResult<()> {
        self.inner.set(path, doc).await
    }

    async fn update(&self, path: &DocumentPath, fields: Document) -> AppResult<Document> {
        self.inner.update(path, fields).await
    }

    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        self.inner.delete(path).await
    }

    async fn append(
        &self,
        collection: &CollectionPath,
        doc: Document,
    ) -> AppResult<DocumentPath> {
        self.inner.append(collection, doc).await
    }

    async fn subscribe(&self, path: &DocumentPath) -> AppResult<DocumentSubscription> {
        self.inner.subscribe(path).await
    }
}

/// Document store wrapper that fails reads of one path.
#[derive(Debug)]
pub struct FailingReadStore {
    inner: MemoryDocumentStore,
    fail_path: String,
}

impl FailingReadStore {
    pub fn new(fail_path: &str) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            fail_path: fail_path.to_string(),
        }
    }

    pub fn inner(&self) -> &MemoryDocumentStore {
        &self.inner
    }
}

#[async_trait]
impl DocumentStore for FailingReadStore {
    fn provider_type(&self) -> &str {
        "failing"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>> {
        if path.as_str() == self.fail_path {
            return Err(examify::AppError::transport(format!(
                "Simulated read failure for {path}"
            )));
        }
        self.inner.get(path).await
    }

    async fn list(
        &self,
        collection: &CollectionPath,
    ) -> AppResult<Vec<(DocumentPath, Document)>> {
        self.inner.list(collection).await
    }

    async fn set(&self, path: &DocumentPath, doc: Document) -> AppResult<()> {
        self.inner.set(path, doc).await
    }

    async fn update(&self, path: &DocumentPath, fields: Document) -> AppResult<Document> {
        self.inner.update(path, fields).await
    }

    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        self.inner.delete(path).await
    }

    async fn append(
        &self,
        collection: &CollectionPath,
        doc: Document,
    ) -> AppResult<DocumentPath> {
        self.inner.append(collection, doc).await
    }

    async fn subscribe(&self, path: &DocumentPath) -> AppResult<DocumentSubscription> {
        self.inner.subscribe(path).await
    }
}

/// Question generator returning a fixed script.
#[derive(Debug)]
pub struct ScriptedGenerator;

#[async_trait]
impl QuestionGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        request: &GenerateQuestionsRequest,
    ) -> AppResult<Vec<GeneratedQuestion>> {
        Ok((0..request.count)
            .map(|i| GeneratedQuestion {
                prompt: format!("{} question {i}", request.topic),
                options: vec!["a".to_string(), "b".to_string()],
                answer_index: 0,
            })
            .collect())
    }
}
