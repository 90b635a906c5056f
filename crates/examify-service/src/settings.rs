//! Application settings reads.

use examify_core::result::AppResult;
use examify_core::types::path::DocumentPath;
use examify_entity::settings::AppSettings;
use examify_query::{DocumentWatch, QueryClient, QueryDescriptor, keys};

/// Read access to the singleton settings document.
///
/// The settings document is mutated by external administration flows;
/// this layer only reads it.
#[derive(Debug, Clone)]
pub struct SettingsService {
    query: QueryClient,
    settings_path: DocumentPath,
}

impl SettingsService {
    /// Create a settings service over the query client.
    pub fn new(query: QueryClient, settings_path: DocumentPath) -> Self {
        Self {
            query,
            settings_path,
        }
    }

    /// The current settings; defaults apply when the document is missing.
    pub async fn get(&self) -> AppResult<AppSettings> {
        let descriptor =
            QueryDescriptor::document(keys::settings(), self.settings_path.clone());
        let state = self.query.fetch_document::<AppSettings>(&descriptor).await;
        if let Some(error) = state.error {
            return Err(error);
        }
        Ok(state.data.unwrap_or_default())
    }

    /// A live view of the settings document.
    pub async fn watch(&self) -> AppResult<DocumentWatch<AppSettings>> {
        let descriptor =
            QueryDescriptor::document(keys::settings(), self.settings_path.clone()).listening();
        self.query.watch_document(&descriptor).await
    }
}
