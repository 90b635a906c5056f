//! In-process auth provider.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use examify_core::error::AppError;
use examify_core::result::AppResult;
use examify_core::traits::auth::{AuthProvider, AuthUser, ProfileFields};

/// Auth provider holding a single current-user handle in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthProvider {
    user: Arc<RwLock<Option<AuthUser>>>,
}

impl MemoryAuthProvider {
    /// Create a provider with no signed-in user.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign a user in, replacing any previous session.
    pub async fn sign_in(&self, user: AuthUser) {
        info!(uid = %user.uid, "User signed in");
        *self.user.write().await = Some(user);
    }

    /// Sign the current user out.
    pub async fn sign_out(&self) {
        *self.user.write().await = None;
    }
}

#[async_trait]
impl AuthProvider for MemoryAuthProvider {
    async fn current_user(&self) -> Option<AuthUser> {
        self.user.read().await.clone()
    }

    async fn update_profile(&self, fields: ProfileFields) -> AppResult<()> {
        let mut guard = self.user.write().await;
        let Some(user) = guard.as_mut() else {
            return Err(AppError::authentication("No user is signed in"));
        };
        if let Some(display_name) = fields.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(photo_url) = fields.photo_url {
            user.photo_url = Some(photo_url);
        }
        Ok(())
    }
}
