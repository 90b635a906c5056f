//! REST-backed document store implementation.
//!
//! Talks to the hosted backend's document API over HTTP. Streaming
//! listeners are not part of the REST surface; [`DocumentStore::subscribe`]
//! reports `NotImplemented` so callers fall back to one-shot reads.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::warn;

use examify_core::config::backend::BackendConfig;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::document_store::{DocumentStore, DocumentSubscription};
use examify_core::types::document::Document;
use examify_core::types::path::{CollectionPath, DocumentPath};

/// Document store client for the hosted backend's REST API.
#[derive(Debug, Clone)]
pub struct RestDocumentStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ListedDocument {
    id: String,
    #[serde(flatten)]
    data: Document,
}

impl RestDocumentStore {
    /// Create a client from backend configuration.
    ///
    /// A missing API key is tolerated here; requests fail with a
    /// `Configuration` error when the store is actually used.
    pub fn new(config: &BackendConfig) -> AppResult<Self> {
        if config.api_key.is_none() {
            warn!("Backend API key not configured; document operations will fail until set");
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    examify_core::error::ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: format!(
                "{}/projects/{}/documents",
                config.api_base_url.trim_end_matches('/'),
                config.project_id
            ),
            api_key: config.api_key.clone(),
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::configuration("Backend API key not configured"))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    fn transport(context: &str, err: reqwest::Error) -> AppError {
        AppError::with_source(
            examify_core::error::ErrorKind::Transport,
            format!("{context}: {err}"),
            err,
        )
    }

    fn unexpected(context: &str, status: StatusCode) -> AppError {
        AppError::transport(format!("{context}: backend returned {status}"))
    }
}

#[async_trait]
impl DocumentStore for RestDocumentStore {
    fn provider_type(&self) -> &str {
        "rest"
    }

    async fn health_check(&self) -> AppResult<bool> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url.trim_end_matches("/documents")))
            .send()
            .await
            .map_err(|e| Self::transport("Health check failed", e))?;
        Ok(response.status().is_success())
    }

    async fn get(&self, path: &DocumentPath) -> AppResult<Option<Document>> {
        let response = self
            .client
            .get(self.url(path.as_str()))
            .bearer_auth(self.api_key()?)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("GET {path} failed"), e))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let doc = response
                    .json::<Document>()
                    .await
                    .map_err(|e| Self::transport(&format!("GET {path} returned bad body"), e))?;
                Ok(Some(doc))
            }
            status => Err(Self::unexpected(&format!("GET {path}"), status)),
        }
    }

    async fn list(
        &self,
        collection: &CollectionPath,
    ) -> AppResult<Vec<(DocumentPath, Document)>> {
        let response = self
            .client
            .get(self.url(collection.as_str()))
            .bearer_auth(self.api_key()?)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("LIST {collection} failed"), e))?;
        if !response.status().is_success() {
            return Err(Self::unexpected(
                &format!("LIST {collection}"),
                response.status(),
            ));
        }
        let listed = response
            .json::<Vec<ListedDocument>>()
            .await
            .map_err(|e| Self::transport(&format!("LIST {collection} returned bad body"), e))?;
        let mut entries = Vec::with_capacity(listed.len());
        for item in listed {
            entries.push((collection.doc(&item.id)?, item.data));
        }
        Ok(entries)
    }

    async fn set(&self, path: &DocumentPath, doc: Document) -> AppResult<()> {
        let response = self
            .client
            .put(self.url(path.as_str()))
            .bearer_auth(self.api_key()?)
            .json(&doc)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("PUT {path} failed"), e))?;
        if !response.status().is_success() {
            return Err(Self::unexpected(&format!("PUT {path}"), response.status()));
        }
        Ok(())
    }

    async fn update(&self, path: &DocumentPath, fields: Document) -> AppResult<Document> {
        let response = self
            .client
            .patch(self.url(path.as_str()))
            .bearer_auth(self.api_key()?)
            .json(&fields)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("PATCH {path} failed"), e))?;
        match response.status() {
            StatusCode::NOT_FOUND => {
                Err(AppError::not_found(format!("Document {path} not found")))
            }
            status if status.is_success() => response
                .json::<Document>()
                .await
                .map_err(|e| Self::transport(&format!("PATCH {path} returned bad body"), e)),
            status => Err(Self::unexpected(&format!("PATCH {path}"), status)),
        }
    }

    async fn delete(&self, path: &DocumentPath) -> AppResult<()> {
        let response = self
            .client
            .delete(self.url(path.as_str()))
            .bearer_auth(self.api_key()?)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("DELETE {path} failed"), e))?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(Self::unexpected(&format!("DELETE {path}"), status)),
        }
    }

    async fn append(
        &self,
        collection: &CollectionPath,
        doc: Document,
    ) -> AppResult<DocumentPath> {
        let response = self
            .client
            .post(self.url(collection.as_str()))
            .bearer_auth(self.api_key()?)
            .json(&doc)
            .send()
            .await
            .map_err(|e| Self::transport(&format!("POST {collection} failed"), e))?;
        if !response.status().is_success() {
            return Err(Self::unexpected(
                &format!("POST {collection}"),
                response.status(),
            ));
        }
        let appended = response
            .json::<AppendResponse>()
            .await
            .map_err(|e| Self::transport(&format!("POST {collection} returned bad body"), e))?;
        collection.doc(&appended.id)
    }

    async fn subscribe(&self, _path: &DocumentPath) -> AppResult<DocumentSubscription> {
        Err(AppError::not_implemented(
            "Streaming listeners are not available over the REST transport",
        ))
    }
}
