use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// In-process cache for rendered page payloads, keyed by route path. Entries
/// expire after the configured TTL; mutating operations invalidate the
/// affected paths explicitly, so a cached view never outlives the state it
/// was rendered from by more than one mutation.
pub struct PageCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

struct CacheEntry {
    value: Value,
    stored_at: Instant,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get(&self, path: &str) -> Option<Value> {
        let entries = self.entries.read().await;
        let entry = entries.get(path)?;

        if entry.stored_at.elapsed() > self.ttl {
            return None;
        }

        Some(entry.value.clone())
    }

    pub async fn put(&self, path: impl Into<String>, value: Value) {
        let mut entries = self.entries.write().await;
        entries.insert(
            path.into(),
            CacheEntry {
                value,
                stored_at: Instant::now(),
            },
        );
    }

    pub async fn invalidate(&self, path: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(path);
    }

    /// Drop every entry whose path starts with the prefix. Used where a
    /// mutation affects all per-user variants of one route.
    pub async fn invalidate_prefix(&self, prefix: &str) {
        let mut entries = self.entries.write().await;
        entries.retain(|path, _| !path.starts_with(prefix));
    }
}

static PAGE_CACHE: Lazy<PageCache> = Lazy::new(|| {
    PageCache::new(Duration::from_secs(
        crate::config::config().api.page_cache_ttl_secs,
    ))
});

pub fn page_cache() -> &'static PageCache {
    &PAGE_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn put_then_get_returns_value() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.put("/documents/r1?user=a@x.com", json!({"id": "r1"})).await;

        assert_eq!(
            cache.get("/documents/r1?user=a@x.com").await,
            Some(json!({"id": "r1"}))
        );
        assert_eq!(cache.get("/documents/r2?user=a@x.com").await, None);
    }

    #[tokio::test]
    async fn expired_entries_are_not_served() {
        let cache = PageCache::new(Duration::from_millis(10));
        cache.put("/dashboard?user=a@x.com", json!([])).await;

        tokio::time::sleep(Duration::from_millis(25)).await;
        assert_eq!(cache.get("/dashboard?user=a@x.com").await, None);
    }

    #[tokio::test]
    async fn invalidate_removes_exact_path_only() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.put("/documents/r1?user=a@x.com", json!(1)).await;
        cache.put("/documents/r2?user=a@x.com", json!(2)).await;

        cache.invalidate("/documents/r1?user=a@x.com").await;

        assert_eq!(cache.get("/documents/r1?user=a@x.com").await, None);
        assert_eq!(cache.get("/documents/r2?user=a@x.com").await, Some(json!(2)));
    }

    #[tokio::test]
    async fn invalidate_prefix_drops_all_user_variants() {
        let cache = PageCache::new(Duration::from_secs(60));
        cache.put("/documents/r1?user=a@x.com", json!(1)).await;
        cache.put("/documents/r1?user=bob@y.com", json!(2)).await;
        cache.put("/dashboard?user=a@x.com", json!(3)).await;

        cache.invalidate_prefix("/documents/r1").await;

        assert_eq!(cache.get("/documents/r1?user=a@x.com").await, None);
        assert_eq!(cache.get("/documents/r1?user=bob@y.com").await, None);
        assert_eq!(cache.get("/dashboard?user=a@x.com").await, Some(json!(3)));
    }
}
