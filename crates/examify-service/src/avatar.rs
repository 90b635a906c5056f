//! Avatar service — upload, profile mutation, and cleanup.

use bytes::Bytes;
use tokio::sync::watch;
use tracing::warn;

use examify_audit::ActivityLogger;
use examify_core::error::{AppError, ErrorKind};
use examify_core::result::AppResult;
use examify_entity::activity::ActivityAction;
use examify_entity::profile::UpdateProfile;
use examify_storage::{UploadController, UploadStatus};

use crate::context::RequestContext;
use crate::profile::ProfileService;

/// Handles avatar uploads for the signed-in user.
///
/// The flow is: upload the file, point the profile document at the new
/// URL, then best-effort delete the replaced object.
#[derive(Debug)]
pub struct AvatarService {
    controller: UploadController,
    profiles: ProfileService,
    audit: ActivityLogger,
}

impl AvatarService {
    /// Creates a new avatar service.
    pub fn new(
        controller: UploadController,
        profiles: ProfileService,
        audit: ActivityLogger,
    ) -> Self {
        Self {
            controller,
            profiles,
            audit,
        }
    }

    /// Subscribe to upload progress for the current and future sessions.
    pub fn upload_status(&self) -> watch::Receiver<UploadStatus> {
        self.controller.status()
    }

    /// Upload a new avatar for the acting user and return its URL.
    pub async fn set_avatar(
        &self,
        ctx: &RequestContext,
        file_name: &str,
        data: Bytes,
    ) -> AppResult<String> {
        if file_name.is_empty() || file_name.contains('/') {
            return Err(AppError::validation(format!(
                "'{file_name}' is not a valid file name"
            )));
        }

        let uid = ctx.actor_id.as_str();
        let previous = match self.profiles.get_profile(uid).await {
            Ok(profile) => profile.and_then(|p| p.photo_url),
            Err(error) => {
                warn!(uid, %error, "Could not read previous avatar URL");
                None
            }
        };

        let destination = format!("avatars/{uid}/{file_name}");
        let url = self.controller.upload_file(&destination, data).await?;

        let result = self
            .profiles
            .update_profile(
                ctx,
                uid,
                UpdateProfile {
                    photo_url: Some(url.clone()),
                    ..UpdateProfile::default()
                },
            )
            .await;
        if let Err(error) = result {
            // The profile document may not exist yet for a first upload;
            // anything else aborts the flow.
            if error.kind != ErrorKind::NotFound {
                return Err(error);
            }
            warn!(uid, "No profile document for avatar update");
        }

        if let Some(previous_url) = previous {
            if previous_url != url {
                self.controller.delete_file(&previous_url).await;
            }
        }

        self.audit
            .log_activity(ctx.activity(ActivityAction::Upload, "profile", uid))
            .await;
        Ok(url)
    }
}
