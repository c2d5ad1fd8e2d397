use std::{fmt::Debug, future::Future, hash::Hash, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use moka::future::Cache;
use tracing::debug;

use crate::config::MemoryConfig;

/// A cached value with the moment it was stored.
#[derive(Clone, Debug)]
pub struct CachedEntry<V> {
    pub value: V,
    pub cached_at: DateTime<Utc>,
}

impl<V> CachedEntry<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
        }
    }

    pub fn into_inner(self) -> V { self.value }
}

/// In-process TTL cache for query results.
///
/// Expiry is checked on every read, so an entry past its TTL is never
/// returned even if [`QueryCache::sweep`] has not run yet. Cloning yields a
/// handle to the same underlying store.
pub struct QueryCache<K, V> {
    cache: Cache<K, CachedEntry<V>>,
    ttl: Duration,
}

impl<K, V> Clone for QueryCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            ttl: self.ttl,
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Hash + Eq + Clone + Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new(config: &MemoryConfig) -> Self {
        Self::with_ttl(config.capacity, config.ttl())
    }

    pub fn with_ttl(capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }

    pub fn ttl(&self) -> Duration { self.ttl }

    pub async fn get(&self, key: &K) -> Option<CachedEntry<V>> {
        self.cache.get(key).await
    }

    /// Stores `value`, replacing whatever was cached under `key`.
    pub async fn set(&self, key: K, value: V) {
        self.cache.insert(key, CachedEntry::new(value)).await;
    }

    pub async fn remove(&self, key: &K) -> bool {
        self.cache.remove(key).await.is_some()
    }

    pub fn clear(&self) { self.cache.invalidate_all(); }

    /// Approximate number of live entries; exact after [`Self::sweep`].
    pub fn entry_count(&self) -> u64 { self.cache.entry_count() }

    /// Evicts expired entries now.
    pub async fn sweep(&self) { self.cache.run_pending_tasks().await; }

    /// Returns the cached value for `key`, or runs `fetch` and caches its
    /// result.
    ///
    /// Concurrent callers missing on the same key share a single `fetch`.
    /// An `Err` is never cached; every waiting caller receives it.
    pub async fn get_or_try_fetch<F, E>(
        &self, key: K, fetch: F,
    ) -> Result<V, Arc<E>>
    where
        F: Future<Output = Result<V, E>>,
        E: Send + Sync + 'static,
    {
        if let Some(entry) = self.cache.get(&key).await {
            debug!(key = ?key, cached_at = %entry.cached_at, "cache hit");
            return Ok(entry.value);
        }

        debug!(key = ?key, "cache miss");

        let entry = self
            .cache
            .try_get_with(key, async move { fetch.await.map(CachedEntry::new) })
            .await?;

        Ok(entry.value)
    }
}
