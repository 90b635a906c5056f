//! Query result cache with staleness marking.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use examify_core::config::cache::QueryCacheConfig;
use examify_core::types::query_key::QueryKey;

/// One cached query result.
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized result payload.
    payload: String,
    /// Stale entries are treated as misses and refetched.
    stale: bool,
}

/// In-memory cache of serialized query results, keyed by rendered
/// [`QueryKey`]s.
///
/// Invalidation marks entries stale rather than evicting them, so a
/// subsequent read under the same key refetches and overwrites.
#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Cache<String, CacheEntry>,
}

impl QueryCache {
    /// Create a cache from configuration.
    pub fn new(config: &QueryCacheConfig) -> Self {
        let entries = Cache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(Duration::from_secs(config.default_ttl_seconds))
            .build();
        Self { entries }
    }

    /// Get the payload cached under a key, unless absent or stale.
    pub async fn get_fresh(&self, key: &QueryKey) -> Option<String> {
        let entry = self.entries.get(&key.render()).await?;
        if entry.stale {
            return None;
        }
        Some(entry.payload)
    }

    /// Store a payload under a key, clearing any staleness.
    pub async fn put(&self, key: &QueryKey, payload: String) {
        self.entries
            .insert(
                key.render(),
                CacheEntry {
                    payload,
                    stale: false,
                },
            )
            .await;
    }

    /// Mark every entry whose key starts with `prefix` as stale.
    /// Returns the number of entries marked.
    pub async fn mark_stale(&self, prefix: &QueryKey) -> u64 {
        let rendered = prefix.render();
        let nested = format!("{rendered}/");
        // Moka doesn't support pattern scanning, so we iterate.
        let matching: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| *entry.0 == rendered || entry.0.starts_with(&nested))
            .map(|entry| entry.0.to_string())
            .collect();

        let mut count = 0u64;
        for key in matching {
            if let Some(entry) = self.entries.get(&key).await {
                self.entries
                    .insert(
                        key,
                        CacheEntry {
                            payload: entry.payload,
                            stale: true,
                        },
                    )
                    .await;
                count += 1;
            }
        }
        debug!(prefix = %rendered, count, "Marked cache entries stale");
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> QueryCache {
        QueryCache::new(&QueryCacheConfig::default())
    }

    fn key(parts: &[&str]) -> QueryKey {
        parts.iter().copied().collect()
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let cache = cache();
        cache.put(&key(&["user", "u1"]), "null".to_string()).await;
        assert_eq!(
            cache.get_fresh(&key(&["user", "u1"])).await,
            Some("null".to_string())
        );
    }

    #[tokio::test]
    async fn test_stale_entries_are_misses() {
        let cache = cache();
        cache.put(&key(&["user", "u1"]), "{}".to_string()).await;
        let marked = cache.mark_stale(&key(&["user", "u1"])).await;
        assert_eq!(marked, 1);
        assert_eq!(cache.get_fresh(&key(&["user", "u1"])).await, None);
    }

    #[tokio::test]
    async fn test_prefix_invalidation_spares_siblings() {
        let cache = cache();
        cache.put(&key(&["exam", "e1"]), "{}".to_string()).await;
        cache.put(&key(&["exam", "e2"]), "{}".to_string()).await;
        cache.put(&key(&["user", "u1"]), "{}".to_string()).await;
        cache.mark_stale(&key(&["exam"])).await;
        assert_eq!(cache.get_fresh(&key(&["exam", "e1"])).await, None);
        assert_eq!(cache.get_fresh(&key(&["exam", "e2"])).await, None);
        assert!(cache.get_fresh(&key(&["user", "u1"])).await.is_some());
    }

    #[tokio::test]
    async fn test_refetch_clears_staleness() {
        let cache = cache();
        cache.put(&key(&["user", "u1"]), "1".to_string()).await;
        cache.mark_stale(&key(&["user", "u1"])).await;
        cache.put(&key(&["user", "u1"]), "2".to_string()).await;
        assert_eq!(
            cache.get_fresh(&key(&["user", "u1"])).await,
            Some("2".to_string())
        );
    }
}
