//! Auth provider trait for the hosted identity backend.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// The current-user handle supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier.
    pub uid: String,
    /// Display name shown in the application.
    pub display_name: Option<String>,
    /// Primary email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub photo_url: Option<String>,
}

/// Profile fields mirrored into the identity provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileFields {
    /// New display name, if changing.
    pub display_name: Option<String>,
    /// New avatar URL, if changing.
    pub photo_url: Option<String>,
}

/// Trait for identity backends.
#[async_trait]
pub trait AuthProvider: Send + Sync + fmt::Debug + 'static {
    /// The currently signed-in user, if any.
    async fn current_user(&self) -> Option<AuthUser>;

    /// Update profile fields on the current user. Fails with
    /// `Authentication` when no user is signed in.
    async fn update_profile(&self, fields: ProfileFields) -> AppResult<()>;
}
