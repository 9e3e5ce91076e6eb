//! In-memory TTL cache for flow verdicts.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::RwLock;

use flowguard_core::types::{FlowKey, Verdict};

/// Expiry horizon used when `now + ttl` is not representable.
const MAX_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Cache entry with absolute expiry.
#[derive(Clone, Copy)]
struct CacheEntry {
    verdict: Verdict,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Result of a lookup for a key that has been set at least once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CachedVerdict {
    /// The stored verdict, valid whether or not it is still fresh
    pub verdict: Verdict,
    /// Whether the entry's TTL has not yet elapsed
    pub fresh: bool,
}

/// In-memory cache of authorization verdicts keyed by flow.
///
/// Thread-safe behind a single reader/writer lock. There is no capacity bound:
/// every distinct flow ever set stays resident until [`purge_stale`] is called.
///
/// [`purge_stale`]: AuthorizationCache::purge_stale
#[derive(Default)]
pub struct AuthorizationCache {
    entries: RwLock<HashMap<FlowKey, CacheEntry>>,
}

impl AuthorizationCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a flow.
    ///
    /// Returns `None` if the flow was never set. Otherwise returns the last
    /// verdict stored for it and whether that verdict is still fresh.
    pub fn get(&self, key: &FlowKey) -> Option<CachedVerdict> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries.get(key).map(|e| CachedVerdict {
            verdict: e.verdict,
            fresh: e.is_fresh(now),
        })
    }

    /// Stores a verdict, replacing any previous entry for the flow.
    ///
    /// The entry stays fresh for `ttl` from now. A `ttl` too large to add to
    /// the clock is clamped to roughly a century.
    pub fn set(&self, key: FlowKey, verdict: Verdict, ttl: Duration) {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .or_else(|| now.checked_add(MAX_TTL))
            .unwrap_or(now);
        self.entries
            .write()
            .insert(key, CacheEntry { verdict, expires_at });
    }

    /// Removes every entry whose TTL has elapsed.
    ///
    /// Fresh entries are untouched, so lookups behave exactly as before
    /// except that purged flows report as never set.
    pub fn purge_stale(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, e| e.is_fresh(now));
        before - entries.len()
    }

    /// Returns the number of cached entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns cache statistics.
    pub fn stats(&self) -> CacheStats {
        let now = Instant::now();
        let entries = self.entries.read();
        let fresh = entries.values().filter(|e| e.is_fresh(now)).count();
        CacheStats {
            total_entries: entries.len(),
            fresh_entries: fresh,
            stale_entries: entries.len() - fresh,
        }
    }
}

/// Cache statistics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheStats {
    /// Total entries (including stale)
    pub total_entries: usize,
    /// Entries whose TTL has not elapsed
    pub fresh_entries: usize,
    /// Entries still resident after their TTL elapsed
    pub stale_entries: usize,
}
