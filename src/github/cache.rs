use serde_json::Value;
use std::collections::HashMap;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub body: Value,
    pub captured_at: Instant,
}

/// An entry captured at `captured_at` is usable at `now` while younger than `ttl`.
pub fn is_fresh(captured_at: Instant, now: Instant, ttl: Duration) -> bool {
    now.saturating_duration_since(captured_at) < ttl
}

/// Response bodies keyed by endpoint path, query string included.
///
/// Expired entries stay in the map until the same path is fetched again and
/// replaces them; nothing is evicted by size.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, endpoint: &str, now: Instant) -> Option<&Value> {
        self.entries
            .get(endpoint)
            .filter(|entry| is_fresh(entry.captured_at, now, self.ttl))
            .map(|entry| &entry.body)
    }

    pub fn insert(&mut self, endpoint: &str, body: Value, now: Instant) {
        self.entries.insert(
            endpoint.to_string(),
            CacheEntry {
                body,
                captured_at: now,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
