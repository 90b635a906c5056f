//! Cache key builders for all Examify query entries.
//!
//! Centralising key construction keeps mutation invalidation sets and
//! read keys from drifting apart.

use examify_core::types::query_key::QueryKey;

/// Cache key for the singleton application settings document.
pub fn settings() -> QueryKey {
    ["settings"].into_iter().collect()
}

// ── Profile keys ───────────────────────────────────────────

/// Cache key for a user profile by uid.
pub fn profile(uid: &str) -> QueryKey {
    ["profile", uid].into_iter().collect()
}

/// Prefix key invalidating every cached profile read.
pub fn profiles() -> QueryKey {
    ["profile"].into_iter().collect()
}

// ── Exam keys ──────────────────────────────────────────────

/// Cache key for an exam by ID.
pub fn exam(exam_id: &str) -> QueryKey {
    ["exam", exam_id].into_iter().collect()
}

/// Cache key for the full exam listing.
pub fn exam_list() -> QueryKey {
    ["exams"].into_iter().collect()
}

// ── Activity keys ──────────────────────────────────────────

/// Cache key for the activity records of one entity.
pub fn activity_for(entity_type: &str, entity_id: &str) -> QueryKey {
    ["activity", entity_type, entity_id].into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_key() {
        assert_eq!(profile("u1").render(), "profile/u1");
    }

    #[test]
    fn test_profiles_prefix_covers_profile() {
        assert!(profiles().is_prefix_of(&profile("u1")));
    }

    #[test]
    fn test_exam_list_is_not_an_exam_prefix() {
        assert!(!exam_list().is_prefix_of(&exam("e1")));
    }
}
