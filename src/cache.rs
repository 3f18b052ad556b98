// cache.rs
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent.
    expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// In-memory map from string keys to values with an absolute expiry.
///
/// Created once at startup and shared by every worker thread for the life of
/// the process. Expired entries are dropped lazily on the next `get`; there is
/// no background sweep and no capacity bound.
#[derive(Debug)]
pub struct ExpiringCache<V> {
    default_ttl: Duration,
    entries: DashMap<String, CacheEntry<V>>,
}

impl<V: Clone> ExpiringCache<V> {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            default_ttl,
            entries: DashMap::new(),
        }
    }

    /// Returns a clone of the value if it has not expired. An expired entry is
    /// removed and reported as a miss.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(now) {
                return Some(entry.value.clone());
            }
        }
        // The read guard is gone here; a writer may have refreshed the entry since.
        self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        None
    }

    pub fn insert(&self, key: impl Into<String>, value: V) {
        self.insert_with_ttl(key, value, self.default_ttl);
    }

    /// Last writer wins.
    pub fn insert_with_ttl(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
