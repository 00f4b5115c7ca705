//! Status command implementation

use colored::Colorize;

use crate::cache::{IMAGE_NAMESPACE, ImageCacheStore};
use crate::config::{Config, ENV_API_KEY};
use crate::error::Result;

/// Show configuration and cache status
pub fn run(config_path: Option<&str>) -> Result<()> {
    let resolved_path = match config_path {
        Some(p) => p.to_string(),
        None => Config::default_path()?.display().to_string(),
    };

    println!("{}", "tripshot status".bold());
    println!("────────────────────────────────────────");
    println!("Config file:    {}", resolved_path);

    let config = Config::load_at(config_path).unwrap_or_default();
    let key_source = if std::env::var(ENV_API_KEY).is_ok() {
        "environment"
    } else if config.api_key.is_some() {
        "config file"
    } else {
        ""
    };

    if key_source.is_empty() {
        println!("API key:        {}", "not configured".yellow());
    } else {
        println!("API key:        configured ({})", key_source);
    }

    match ImageCacheStore::open(IMAGE_NAMESPACE).and_then(|s| s.stats()) {
        Ok(stats) => {
            let path = ImageCacheStore::cache_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            println!("Cache location: {}", path);
            println!("Cached images:  {}", stats.valid_entries);
        }
        Err(err) => {
            println!("Cache:          {} ({})", "unavailable".yellow(), err);
        }
    }

    Ok(())
}
