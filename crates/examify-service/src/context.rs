//! Per-request actor context.

use examify_core::traits::auth::AuthUser;
use examify_entity::activity::{ActivityAction, NewActivityRecord};

/// Identifies the actor behind a service call, for audit records.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Stable actor identifier.
    pub actor_id: String,
    /// Display name at the time of the call.
    pub actor_name: String,
}

impl RequestContext {
    /// Create a context from raw actor fields.
    pub fn new(actor_id: impl Into<String>, actor_name: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            actor_name: actor_name.into(),
        }
    }

    /// Create a context for the given authenticated user.
    pub fn for_user(user: &AuthUser) -> Self {
        Self {
            actor_id: user.uid.clone(),
            actor_name: user
                .display_name
                .clone()
                .unwrap_or_else(|| user.uid.clone()),
        }
    }

    /// Build an activity record attributed to this actor.
    pub fn activity(
        &self,
        action: ActivityAction,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> NewActivityRecord {
        NewActivityRecord {
            actor_id: self.actor_id.clone(),
            actor_name: self.actor_name.clone(),
            action,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}
