//! TTL cache for FLOWGUARD authorization verdicts.
//!
//! Concurrent reads share one lock; writes are exclusive. Stale entries stay
//! in place until overwritten or explicitly purged.

mod cache;

pub use cache::{AuthorizationCache, CacheStats, CachedVerdict};
