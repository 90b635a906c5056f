//! Document access layer behavior: caching, gating, subscriptions,
//! and invalidating mutations.

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;

use examify::{QueryClient, QueryDescriptor};
use examify_core::config::cache::QueryCacheConfig;
use examify_core::types::document::Document;
use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_query::{MutationOp, MutationRequest, keys};
use examify_store::MemoryDocumentStore;

use crate::helpers::{CountingStore, put_doc, wait_until};

fn client_over(store: Arc<CountingStore>) -> QueryClient {
    QueryClient::new(store, &QueryCacheConfig::default())
}

fn doc(value: serde_json::Value) -> Document {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn disabled_descriptor_never_reaches_the_store() {
    let store = Arc::new(CountingStore::new());
    let client = client_over(store.clone());

    let descriptor = QueryDescriptor::document(
        keys::profile("u1"),
        DocumentPath::parse("profiles/u1").unwrap(),
    )
    .enabled(false);

    let state = client.fetch_document::<serde_json::Value>(&descriptor).await;
    assert!(!state.is_loading);
    assert!(state.data.is_none());
    assert!(state.error.is_none());
    assert_eq!(store.reads(), 0);
}

#[tokio::test]
async fn missing_document_settles_without_error() {
    let store = Arc::new(CountingStore::new());
    let client = client_over(store);

    let descriptor = QueryDescriptor::document(
        keys::profile("ghost"),
        DocumentPath::parse("profiles/ghost").unwrap(),
    );
    let state = client.fetch_document::<serde_json::Value>(&descriptor).await;
    assert!(!state.is_loading);
    assert!(state.data.is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn repeated_reads_are_served_from_cache() {
    let store = Arc::new(CountingStore::new());
    put_doc(store.inner(), "profiles/u1", json!({"uid": "u1"})).await;
    let client = client_over(store.clone());

    let descriptor = QueryDescriptor::document(
        keys::profile("u1"),
        DocumentPath::parse("profiles/u1").unwrap(),
    );
    for _ in 0..3 {
        let state = client.fetch_document::<serde_json::Value>(&descriptor).await;
        assert!(state.data.is_some());
    }
    assert_eq!(store.reads(), 1);
}

#[tokio::test]
async fn successful_mutation_invalidates_matching_reads() {
    let store = Arc::new(CountingStore::new());
    put_doc(store.inner(), "profiles/u1", json!({"uid": "u1", "bio": "old"})).await;
    let client = client_over(store.clone());

    let descriptor = QueryDescriptor::document(
        keys::profile("u1"),
        DocumentPath::parse("profiles/u1").unwrap(),
    );
    let _ = client.fetch_document::<serde_json::Value>(&descriptor).await;
    let _ = client.fetch_document::<serde_json::Value>(&descriptor).await;
    assert_eq!(store.reads(), 1);

    client
        .mutate(MutationRequest {
            collection: CollectionPath::parse("profiles").unwrap(),
            op: MutationOp::Update {
                id: "u1".to_string(),
                fields: doc(json!({"bio": "new"})),
            },
            invalidate: vec![keys::profile("u1")],
        })
        .await
        .unwrap();

    let state = client.fetch_document::<serde_json::Value>(&descriptor).await;
    assert_eq!(store.reads(), 2);
    let bio = state.data.unwrap().get("bio").cloned().unwrap();
    assert_eq!(bio, json!("new"));
}

#[tokio::test]
async fn mutation_errors_reach_the_error_callback_verbatim() {
    let store = Arc::new(CountingStore::new());
    let client = client_over(store);

    let seen = Arc::new(Mutex::new(None::<String>));
    let seen_in_callback = seen.clone();
    let result = client
        .mutate_with(
            MutationRequest {
                collection: CollectionPath::parse("profiles").unwrap(),
                op: MutationOp::Update {
                    id: "missing".to_string(),
                    fields: doc(json!({"bio": "x"})),
                },
                invalidate: vec![],
            },
            |_| panic!("success callback must not run"),
            |error| {
                *seen_in_callback.lock().unwrap() = Some(error.message.clone());
            },
        )
        .await;

    let error = result.unwrap_err();
    assert_eq!(seen.lock().unwrap().as_deref(), Some(error.message.as_str()));
}

#[tokio::test]
async fn watch_observes_external_updates() {
    let store = Arc::new(MemoryDocumentStore::new());
    let client = QueryClient::new(store.clone(), &QueryCacheConfig::default());
    let path = DocumentPath::parse("settings/app").unwrap();

    let descriptor =
        QueryDescriptor::document(keys::settings(), path.clone()).listening();
    let mut watch = client
        .watch_document::<serde_json::Value>(&descriptor)
        .await
        .unwrap();

    // Wait for the initial read to settle (document absent).
    wait_until(|| !watch.current().is_loading).await;
    assert!(watch.current().data.is_none());

    put_doc(&store, "settings/app", json!({"enable_audit_logs": false})).await;
    wait_until(|| watch.current().data.is_some()).await;
    let data = watch.current().data.unwrap();
    assert_eq!(data.get("enable_audit_logs").cloned(), Some(json!(false)));
}

#[tokio::test]
async fn dropping_a_watch_tears_down_its_subscription() {
    let store = Arc::new(MemoryDocumentStore::new());
    let client = QueryClient::new(store.clone(), &QueryCacheConfig::default());
    let path = DocumentPath::parse("settings/app").unwrap();

    let descriptor =
        QueryDescriptor::document(keys::settings(), path.clone()).listening();
    let watch = client
        .watch_document::<serde_json::Value>(&descriptor)
        .await
        .unwrap();
    assert_eq!(store.subscriber_count(&path), 1);

    // A second watch of the same path is independent.
    let other = client
        .watch_document::<serde_json::Value>(&descriptor)
        .await
        .unwrap();
    assert_eq!(store.subscriber_count(&path), 2);

    drop(watch);
    wait_until(|| store.subscriber_count(&path) == 1).await;
    drop(other);
    wait_until(|| store.subscriber_count(&path) == 0).await;
}

#[tokio::test]
async fn disabled_watch_stays_idle() {
    let store = Arc::new(CountingStore::new());
    let client = client_over(store.clone());

    let descriptor = QueryDescriptor::document(
        keys::settings(),
        DocumentPath::parse("settings/app").unwrap(),
    )
    .listening()
    .enabled(false);
    let watch = client
        .watch_document::<serde_json::Value>(&descriptor)
        .await
        .unwrap();

    let state = watch.current();
    assert!(!state.is_loading);
    assert!(state.data.is_none());
    assert!(state.error.is_none());
    assert_eq!(store.reads(), 0);
}
