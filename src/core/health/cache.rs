//! Model health result cache
//!
//! Entries expire lazily: a stale entry is removed by the lookup that finds it.
//! The lock only ever guards map access and is never held across a probe.

use super::types::HealthCheckResult;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default time a model health result stays valid
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30);

/// TTL cache of model health results keyed by model name
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<HashMap<String, Arc<HealthCheckResult>>>,
    ttl: Duration,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`, if any
    pub fn get(&self, key: &str) -> Option<Arc<HealthCheckResult>> {
        self.get_at(key, Instant::now())
    }

    /// Fresh entry for `key` as seen at the monotonic instant `now`. Evicts the
    /// entry if it expired.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<Arc<HealthCheckResult>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(result) if result.is_fresh_at(self.ttl, now) => Some(Arc::clone(result)),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store `result` under `key`, replacing any previous entry
    pub fn insert(&self, key: impl Into<String>, result: Arc<HealthCheckResult>) {
        self.entries.lock().insert(key.into(), result);
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of entries that are still fresh
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|result| result.is_fresh_at(self.ttl, now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
