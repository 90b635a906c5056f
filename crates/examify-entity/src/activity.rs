//! Activity log entry entity model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use examify_core::error::AppError;
use examify_core::result::AppResult;

/// The kind of action an activity record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// An entity was created.
    Create,
    /// An entity was updated.
    Update,
    /// An entity was deleted.
    Delete,
    /// A file was uploaded.
    Upload,
    /// A user signed in.
    Login,
    /// Questions were generated by the AI collaborator.
    Generate,
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Upload => "upload",
            Self::Login => "login",
            Self::Generate => "generate",
        };
        f.write_str(tag)
    }
}

/// An immutable activity record as read back from the log collection.
///
/// `id` and `timestamp` are assigned by the store; records are never
/// updated or deleted by this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLogRecord {
    /// Store-assigned record identifier.
    pub id: Uuid,
    /// The user who performed the action.
    pub actor_id: String,
    /// Display name of the actor at the time of the action.
    pub actor_name: String,
    /// The action that was performed.
    pub action: ActivityAction,
    /// The type of entity acted on (e.g., `"exam"`, `"profile"`).
    pub entity_type: String,
    /// The entity ID acted on.
    pub entity_id: String,
    /// Server-assigned timestamp, monotonic per store instance.
    pub timestamp: DateTime<Utc>,
}

/// Data required to append a new activity record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewActivityRecord {
    /// The user performing the action.
    #[validate(length(min = 1, message = "actor_id cannot be empty"))]
    pub actor_id: String,
    /// Display name of the actor.
    #[validate(length(min = 1, message = "actor_name cannot be empty"))]
    pub actor_name: String,
    /// The action performed.
    pub action: ActivityAction,
    /// Entity type acted on.
    #[validate(length(min = 1, message = "entity_type cannot be empty"))]
    pub entity_type: String,
    /// Entity ID acted on.
    #[validate(length(min = 1, message = "entity_id cannot be empty"))]
    pub entity_id: String,
}

impl NewActivityRecord {
    /// Validate required fields, mapping failures into the unified error.
    pub fn check(&self) -> AppResult<()> {
        Validate::validate(self)
            .map_err(|e| AppError::validation(format!("Invalid activity record: {e}")))
    }
}
