//! Local cache for resolved destination images
//!
//! SQLite-backed (query -> URL) memoization with a freshness horizon and a
//! hard entry cap. Each escalation tier of the resolver owns its own sub-key,
//! so the store only ever deals in flat normalized strings.

pub mod key;
pub mod store;

use std::time::Duration;

/// Freshness horizon: entries older than this are treated as absent.
pub const TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60); // 30 days

/// Hard cap on entries per namespace.
pub const MAX_ENTRIES: usize = 200;

/// Number of oldest entries removed in one sweep when the cap is crossed.
/// Evicting in bulk amortizes the sweep instead of paying it on every write.
pub const EVICT_BATCH: usize = 50;

/// Retention window applied when the backing store reports quota exhaustion:
/// everything older is dropped before the write is retried.
pub const RETENTION_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60); // 7 days

/// Namespace owned by the image resolution subsystem. Other per-user stores
/// (favorites lists and the like) live in their own namespaces.
pub const IMAGE_NAMESPACE: &str = "destination_images";

// Re-export main types
pub use key::normalize_query;
pub use store::{CacheStats, ClearStats, ImageCacheStore};
