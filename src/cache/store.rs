//! SQLite-backed store for resolved destination image URLs
//!
//! One row per (namespace, normalized query) pair. Entries expire after
//! [`TTL`](super::TTL) and the per-namespace cardinality is capped, with the
//! oldest entries evicted in bulk once the cap is crossed.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};

use super::{EVICT_BATCH, MAX_ENTRIES, RETENTION_WINDOW, TTL};
use crate::cache::key::normalize_query;
use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, CacheError>;

/// Bounded, time-expiring (query -> image URL) store.
pub struct ImageCacheStore {
    conn: Connection,
    namespace: String,
}

impl ImageCacheStore {
    /// Open or create the store at the default XDG cache location
    pub fn open(namespace: &str) -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir, namespace)
    }

    /// Get the cache directory path (~/.cache/tripshot on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("tripshot"))
    }

    /// Open the store at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path, namespace: &str) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("images.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Image cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove cache DB: {}", e)))?;
            return Self::open_at(cache_dir, namespace);
        }

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS image_cache (
                namespace TEXT NOT NULL,
                cache_key TEXT NOT NULL,
                url TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                PRIMARY KEY (namespace, cache_key)
            );

            CREATE INDEX IF NOT EXISTS idx_image_cache_age
                ON image_cache(namespace, created_at);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }

    /// Get the cached URL for a query if present and fresh.
    ///
    /// An expired entry is deleted on the way out and reported absent.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let key = normalize_query(key);
        let now = Utc::now().timestamp();

        let row: Option<(String, i64)> = self
            .conn
            .query_row(
                "SELECT url, created_at FROM image_cache
                 WHERE namespace = ?1 AND cache_key = ?2",
                params![self.namespace, key],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;

        match row {
            Some((_, created_at)) if now - created_at > TTL.as_secs() as i64 => {
                let _ = self.conn.execute(
                    "DELETE FROM image_cache WHERE namespace = ?1 AND cache_key = ?2",
                    params![self.namespace, key],
                );
                Ok(None)
            }
            Some((url, _)) => Ok(Some(url)),
            None => Ok(None),
        }
    }

    /// Store a resolved URL under a query key.
    ///
    /// Crossing the entry cap evicts the oldest [`EVICT_BATCH`] entries in one
    /// sweep. A quota-exceeded write compacts the namespace down to the
    /// retention window and retries once; the caller decides whether a second
    /// failure matters.
    pub fn put(&self, key: &str, url: &str) -> Result<()> {
        let key = normalize_query(key);
        let now = Utc::now().timestamp();

        match self.put_at(&key, url, now) {
            Err(CacheError::QuotaExceeded) => {
                log::warn!(
                    "Image cache write hit storage quota, compacting to {}-day retention",
                    RETENTION_WINDOW.as_secs() / 86_400
                );
                self.compact_retention()?;
                self.put_at(&key, url, now)
            }
            other => other,
        }
    }

    /// Insert with an explicit timestamp, then sweep if over capacity.
    fn put_at(&self, key: &str, url: &str, created_at: i64) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO image_cache (namespace, cache_key, url, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.namespace, key, url, created_at],
        )?;

        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM image_cache WHERE namespace = ?1",
            params![self.namespace],
            |r| r.get(0),
        )?;

        if count > MAX_ENTRIES as i64 {
            let evicted = self.conn.execute(
                "DELETE FROM image_cache WHERE namespace = ?1 AND cache_key IN (
                     SELECT cache_key FROM image_cache
                     WHERE namespace = ?1
                     ORDER BY created_at ASC
                     LIMIT ?2
                 )",
                params![self.namespace, EVICT_BATCH as i64],
            )?;
            log::debug!("Image cache over capacity, evicted {} oldest entries", evicted);
        }

        Ok(())
    }

    /// Drop every entry older than the retention window. Returns the number
    /// of entries removed.
    pub fn compact_retention(&self) -> Result<usize> {
        let cutoff = Utc::now().timestamp() - RETENTION_WINDOW.as_secs() as i64;
        let removed = self.conn.execute(
            "DELETE FROM image_cache WHERE namespace = ?1 AND created_at < ?2",
            params![self.namespace, cutoff],
        )?;
        Ok(removed)
    }

    /// Clear all entries in this namespace
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM image_cache WHERE namespace = ?1",
            params![self.namespace],
            |r| r.get(0),
        )?;

        self.conn.execute(
            "DELETE FROM image_cache WHERE namespace = ?1",
            params![self.namespace],
        )?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Get cache statistics for this namespace
    pub fn stats(&self) -> Result<CacheStats> {
        let fresh_after = Utc::now().timestamp() - TTL.as_secs() as i64;

        let total_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM image_cache WHERE namespace = ?1",
            params![self.namespace],
            |r| r.get(0),
        )?;

        let valid_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM image_cache WHERE namespace = ?1 AND created_at >= ?2",
            params![self.namespace, fresh_after],
            |r| r.get(0),
        )?;

        let oldest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MIN(created_at) FROM image_cache WHERE namespace = ?1",
                params![self.namespace],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        let newest: Option<i64> = self
            .conn
            .query_row(
                "SELECT MAX(created_at) FROM image_cache WHERE namespace = ?1",
                params![self.namespace],
                |r| r.get(0),
            )
            .optional()?
            .flatten();

        Ok(CacheStats {
            total_entries: total_entries as usize,
            valid_entries: valid_entries as usize,
            expired_entries: (total_entries - valid_entries) as usize,
            oldest_entry: oldest,
            newest_entry: newest,
        })
    }
}

/// Statistics about a cache clear operation
#[derive(Debug)]
pub struct ClearStats {
    pub entries_removed: usize,
}

/// Statistics about cache state
#[derive(Debug)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub oldest_entry: Option<i64>,
    pub newest_entry: Option<i64>,
}
