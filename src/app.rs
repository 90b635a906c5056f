//! Application context — explicit construction and wiring of every
//! component from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use examify_audit::ActivityLogger;
use examify_auth::MemoryAuthProvider;
use examify_core::config::AppConfig;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::auth::AuthProvider;
use examify_core::traits::document_store::DocumentStore;
use examify_core::traits::generator::QuestionGenerator;
use examify_core::traits::object_store::ObjectStore;
use examify_core::types::path::{CollectionPath, DocumentPath};
use examify_query::QueryClient;
use examify_service::{
    AvatarService, ExamService, ProfileService, QuestionService, SettingsService,
};
use examify_storage::{LocalObjectStore, MemoryObjectStore, UploadController};
use examify_store::{MemoryDocumentStore, RestDocumentStore};

const PROFILES_COLLECTION: &str = "profiles";
const EXAMS_COLLECTION: &str = "exams";

/// Builder for [`AppContext`], allowing collaborator substitution.
///
/// Clients are constructed here and injected into each component, so
/// tests swap in fakes without touching global state.
pub struct AppContextBuilder {
    config: AppConfig,
    store: Option<Arc<dyn DocumentStore>>,
    objects: Option<Arc<dyn ObjectStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
    generator: Option<Arc<dyn QuestionGenerator>>,
}

impl AppContextBuilder {
    /// Start building from configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            store: None,
            objects: None,
            auth: None,
            generator: None,
        }
    }

    /// Substitute the document store.
    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Substitute the object store.
    pub fn with_objects(mut self, objects: Arc<dyn ObjectStore>) -> Self {
        self.objects = Some(objects);
        self
    }

    /// Substitute the auth provider.
    pub fn with_auth(mut self, auth: Arc<dyn AuthProvider>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Provide the AI question-generation backend.
    pub fn with_generator(mut self, generator: Arc<dyn QuestionGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Construct the context, wiring every component.
    pub async fn build(self) -> AppResult<AppContext> {
        let config = self.config;

        let store: Arc<dyn DocumentStore> = match self.store {
            Some(store) => store,
            None => match config.backend.provider.as_str() {
                "memory" => Arc::new(MemoryDocumentStore::new()),
                "rest" => Arc::new(RestDocumentStore::new(&config.backend)?),
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown backend provider '{other}'"
                    )));
                }
            },
        };

        let objects: Arc<dyn ObjectStore> = match self.objects {
            Some(objects) => objects,
            None => match config.storage.provider.as_str() {
                "memory" => Arc::new(MemoryObjectStore::new(
                    config.storage.chunk_size_bytes as usize,
                )),
                "local" => Arc::new(LocalObjectStore::new(&config.storage).await?),
                other => {
                    return Err(AppError::configuration(format!(
                        "Unknown storage provider '{other}'"
                    )));
                }
            },
        };

        let auth: Arc<dyn AuthProvider> = match self.auth {
            Some(auth) => auth,
            None => Arc::new(MemoryAuthProvider::new()),
        };

        // AI features degrade without credentials; the generator backend
        // is only honored when a key is configured.
        let generator = if config.ai.api_key.is_some() {
            if self.generator.is_none() {
                warn!("AI API key configured but no generator backend provided");
            }
            self.generator
        } else {
            None
        };

        let query = QueryClient::new(store.clone(), &config.cache);
        let audit = ActivityLogger::from_config(store.clone(), &config.audit)?;
        let uploader = UploadController::new(objects.clone(), &config.storage);

        let settings_path = DocumentPath::parse(config.audit.settings_path.clone())?;
        let profiles_collection = CollectionPath::parse(PROFILES_COLLECTION)?;
        let exams_collection = CollectionPath::parse(EXAMS_COLLECTION)?;

        let settings = SettingsService::new(query.clone(), settings_path);
        let profiles = ProfileService::new(
            query.clone(),
            auth.clone(),
            audit.clone(),
            profiles_collection,
        );
        let exams = ExamService::new(query.clone(), audit.clone(), exams_collection);
        let avatars = AvatarService::new(uploader, profiles.clone(), audit.clone());
        let questions = QuestionService::new(generator, audit.clone(), &config.ai);

        info!(
            backend = store.provider_type(),
            storage = objects.provider_type(),
            "Examify data layer initialized"
        );

        Ok(AppContext {
            config,
            store,
            objects,
            auth,
            query,
            audit,
            settings,
            profiles,
            exams,
            avatars,
            questions,
        })
    }
}

/// The fully wired data layer.
pub struct AppContext {
    /// The configuration the context was built from.
    pub config: AppConfig,
    /// Document store client.
    pub store: Arc<dyn DocumentStore>,
    /// Object store client.
    pub objects: Arc<dyn ObjectStore>,
    /// Identity provider client.
    pub auth: Arc<dyn AuthProvider>,
    /// Query client shared by all services.
    pub query: QueryClient,
    /// Activity logger shared by all services.
    pub audit: ActivityLogger,
    /// Settings reads.
    pub settings: SettingsService,
    /// Profile reads and updates.
    pub profiles: ProfileService,
    /// Exam CRUD.
    pub exams: ExamService,
    /// Avatar uploads.
    pub avatars: AvatarService,
    /// AI question generation.
    pub questions: QuestionService,
}

impl AppContext {
    /// Start building a context from configuration.
    pub fn builder(config: AppConfig) -> AppContextBuilder {
        AppContextBuilder::new(config)
    }

    /// Build a context with the configured default collaborators.
    pub async fn build(config: AppConfig) -> AppResult<Self> {
        Self::builder(config).build().await
    }
}
