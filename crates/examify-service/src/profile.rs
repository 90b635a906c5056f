//! User profile service — reads, updates, and identity mirroring.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use examify_audit::ActivityLogger;
use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::auth::{AuthProvider, AuthUser, ProfileFields};
use examify_core::types::document::{Document, server_timestamp};
use examify_core::types::path::CollectionPath;
use examify_entity::activity::ActivityAction;
use examify_entity::profile::{UpdateProfile, UserProfile};
use examify_query::{MutationOp, MutationRequest, QueryClient, QueryDescriptor, keys};

use crate::context::RequestContext;

/// Handles user profile reads and updates.
#[derive(Debug, Clone)]
pub struct ProfileService {
    query: QueryClient,
    auth: Arc<dyn AuthProvider>,
    audit: ActivityLogger,
    profiles: CollectionPath,
}

impl ProfileService {
    /// Creates a new profile service.
    pub fn new(
        query: QueryClient,
        auth: Arc<dyn AuthProvider>,
        audit: ActivityLogger,
        profiles: CollectionPath,
    ) -> Self {
        Self {
            query,
            auth,
            audit,
            profiles,
        }
    }

    /// Reads a profile by uid. A missing profile is `None`, not an error.
    pub async fn get_profile(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        let descriptor =
            QueryDescriptor::document(keys::profile(uid), self.profiles.doc(uid)?);
        let state = self.query.fetch_document::<UserProfile>(&descriptor).await;
        if let Some(error) = state.error {
            return Err(error);
        }
        Ok(state.data)
    }

    /// Writes the profile document for a freshly signed-in user if one
    /// does not exist yet.
    pub async fn ensure_profile(&self, user: &AuthUser) -> AppResult<UserProfile> {
        if let Some(existing) = self.get_profile(&user.uid).await? {
            return Ok(existing);
        }

        let mut doc = Document::new();
        doc.insert("uid".to_string(), Value::String(user.uid.clone()));
        if let Some(display_name) = &user.display_name {
            doc.insert(
                "display_name".to_string(),
                Value::String(display_name.clone()),
            );
        }
        if let Some(email) = &user.email {
            doc.insert("email".to_string(), Value::String(email.clone()));
        }
        if let Some(photo_url) = &user.photo_url {
            doc.insert("photo_url".to_string(), Value::String(photo_url.clone()));
        }
        doc.insert("updated_at".to_string(), server_timestamp());

        let outcome = self
            .query
            .mutate(MutationRequest {
                collection: self.profiles.clone(),
                op: MutationOp::Set {
                    id: user.uid.clone(),
                    doc,
                },
                invalidate: vec![keys::profile(&user.uid)],
            })
            .await?;
        info!(uid = user.uid, "Created profile document");
        Self::decode_profile(outcome.document)
    }

    /// Updates profile fields.
    ///
    /// On success the cached profile read is invalidated, the display
    /// fields are mirrored into the identity provider for the current
    /// user, and an activity record is appended.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        uid: &str,
        update: UpdateProfile,
    ) -> AppResult<UserProfile> {
        update.check()?;

        let mut fields = Document::new();
        if let Some(display_name) = &update.display_name {
            fields.insert(
                "display_name".to_string(),
                Value::String(display_name.clone()),
            );
        }
        if let Some(photo_url) = &update.photo_url {
            fields.insert("photo_url".to_string(), Value::String(photo_url.clone()));
        }
        if let Some(bio) = &update.bio {
            fields.insert("bio".to_string(), Value::String(bio.clone()));
        }
        fields.insert("updated_at".to_string(), server_timestamp());

        let outcome = self
            .query
            .mutate(MutationRequest {
                collection: self.profiles.clone(),
                op: MutationOp::Update {
                    id: uid.to_string(),
                    fields,
                },
                invalidate: vec![keys::profile(uid)],
            })
            .await?;

        self.mirror_to_auth(uid, &update).await;
        self.audit
            .log_activity(ctx.activity(ActivityAction::Update, "profile", uid))
            .await;

        Self::decode_profile(outcome.document)
    }

    /// Mirror display fields into the identity provider when the updated
    /// profile belongs to the signed-in user. Mirroring is best-effort:
    /// the profile document is already the source of truth.
    async fn mirror_to_auth(&self, uid: &str, update: &UpdateProfile) {
        if update.display_name.is_none() && update.photo_url.is_none() {
            return;
        }
        let Some(current) = self.auth.current_user().await else {
            return;
        };
        if current.uid != uid {
            return;
        }
        let fields = ProfileFields {
            display_name: update.display_name.clone(),
            photo_url: update.photo_url.clone(),
        };
        if let Err(error) = self.auth.update_profile(fields).await {
            warn!(uid, %error, "Failed to mirror profile fields into auth provider");
        }
    }

    fn decode_profile(doc: Option<Document>) -> AppResult<UserProfile> {
        let doc = doc.ok_or_else(|| AppError::internal("Profile write returned no document"))?;
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}
