//! Cache management commands

use crate::cache::{IMAGE_NAMESPACE, ImageCacheStore};
use crate::cli::OutputFormat;
use crate::error::Result;

/// Show cache status/statistics
pub fn stats(format: Option<OutputFormat>) -> Result<()> {
    let store = ImageCacheStore::open(IMAGE_NAMESPACE)?;
    let stats = store.stats()?;

    match format.unwrap_or_default() {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "total_entries": stats.total_entries,
                "valid_entries": stats.valid_entries,
                "expired_entries": stats.expired_entries,
                "oldest_entry_timestamp": stats.oldest_entry,
                "newest_entry_timestamp": stats.newest_entry,
                "path": ImageCacheStore::cache_dir()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "unknown".to_string()),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            let path = ImageCacheStore::cache_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "unknown".to_string());

            println!("Image Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", path);
            println!("Valid entries:  {}", stats.valid_entries);
            println!("Expired:        {}", stats.expired_entries);

            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_timestamp(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_timestamp(newest));
            }
        }
    }

    Ok(())
}

/// Clear all cached image entries
pub fn clear(format: Option<OutputFormat>) -> Result<()> {
    let store = ImageCacheStore::open(IMAGE_NAMESPACE)?;
    let stats = store.clear_all()?;

    match format.unwrap_or_default() {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": stats.entries_removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if stats.entries_removed > 0 {
                println!("Cleared {} cached image entries", stats.entries_removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Drop entries older than the retention window
pub fn compact(format: Option<OutputFormat>) -> Result<()> {
    let store = ImageCacheStore::open(IMAGE_NAMESPACE)?;
    let removed = store.compact_retention()?;

    match format.unwrap_or_default() {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => println!("Compacted cache, removed {} entries", removed),
    }

    Ok(())
}

/// Show cache path
pub fn path() -> Result<()> {
    let path = ImageCacheStore::cache_dir()?;
    println!("{}", path.display());
    Ok(())
}

/// Format a unix timestamp as local date/time
fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}
