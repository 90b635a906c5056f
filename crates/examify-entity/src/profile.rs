//! User profile entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use examify_core::error::AppError;
use examify_core::result::AppResult;

/// A user profile document mirroring identity-provider fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier (matches the identity provider's uid).
    pub uid: String,
    /// Display name shown in the application.
    pub display_name: Option<String>,
    /// Primary email address.
    pub email: Option<String>,
    /// Avatar URL.
    pub photo_url: Option<String>,
    /// Free-form biography shown on the profile page.
    pub bio: Option<String>,
    /// When the profile was last written.
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields for updating a user's own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfile {
    /// New display name (optional).
    #[validate(length(min = 1, max = 120, message = "display name must be 1-120 characters"))]
    pub display_name: Option<String>,
    /// New avatar URL (optional).
    pub photo_url: Option<String>,
    /// New biography (optional).
    #[validate(length(max = 2000, message = "bio must be at most 2000 characters"))]
    pub bio: Option<String>,
}

impl UpdateProfile {
    /// Validate field constraints, mapping failures into the unified error.
    pub fn check(&self) -> AppResult<()> {
        Validate::validate(self)
            .map_err(|e| AppError::validation(format!("Invalid profile update: {e}")))
    }
}
