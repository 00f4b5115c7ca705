//! Destination image resolution
//!
//! The one public entry point every screen goes through: a travel query in, a
//! usable image URL out, always. Composes the cache store, the relevance
//! scorer, and the escalating search tiers; degrades to a deterministic
//! placeholder when the provider has nothing to offer.

pub mod batch;
pub mod score;
pub mod tiers;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::Rng;
use tokio::sync::broadcast;

use crate::cache::{IMAGE_NAMESPACE, ImageCacheStore, normalize_query};
use crate::client::PhotoSearchApi;
use tiers::{IndexPicker, SearchTier};

#[allow(unused_imports)]
pub use batch::{BatchImage, BatchItem, resolve_batch, resolve_batch_with};

/// Base of the deterministic fallback image; the query's first token is
/// appended as overlay text.
const PLACEHOLDER_BASE: &str = "https://via.placeholder.com/400x250/4285f4/ffffff";

/// Deterministic fallback URL for a query whose resolution exhausted all
/// tiers. Derived from the first whitespace token so the same failing query
/// always settles on the same image.
pub fn placeholder_url(query: &str) -> String {
    let label = query.split_whitespace().next().unwrap_or("travel");
    reqwest::Url::parse_with_params(PLACEHOLDER_BASE, &[("text", label)])
        .map(|u| u.to_string())
        .unwrap_or_else(|_| PLACEHOLDER_BASE.to_string())
}

/// Resolves travel queries to representative photo URLs.
///
/// The cache handle is injected at construction (`None` for `--no-cache`) and
/// mutex-guarded: concurrent resolutions may race on the same key, in which
/// case the last write wins and the result is identical anyway. Concurrent
/// resolutions of the *same* normalized query are collapsed into one provider
/// round-trip; followers wait on the leader's broadcast.
pub struct ImageResolver<C: PhotoSearchApi> {
    client: Arc<C>,
    cache: Option<Mutex<ImageCacheStore>>,
    picker: Box<IndexPicker>,
    inflight: Mutex<HashMap<String, broadcast::Sender<String>>>,
}

impl<C: PhotoSearchApi> ImageResolver<C> {
    /// Create a resolver backed by the default on-disk cache.
    ///
    /// A cache that fails to open leaves the resolver fully functional,
    /// just uncached.
    pub fn new(client: C, cache_enabled: bool) -> Self {
        let store = if cache_enabled {
            ImageCacheStore::open(IMAGE_NAMESPACE).ok()
        } else {
            None
        };
        Self::with_store(client, store)
    }

    /// Create a resolver over an explicit store (for testing)
    pub fn with_store(client: C, store: Option<ImageCacheStore>) -> Self {
        Self {
            client: Arc::new(client),
            cache: store.map(Mutex::new),
            picker: Box::new(|bound| {
                if bound <= 1 {
                    0
                } else {
                    rand::thread_rng().gen_range(0..bound)
                }
            }),
            inflight: Mutex::new(HashMap::new()),
        }
    }

    /// Replace the tier-2 index picker (tests pin this to a constant)
    #[allow(dead_code)]
    pub fn with_picker(mut self, picker: Box<IndexPicker>) -> Self {
        self.picker = picker;
        self
    }

    /// Resolve a travel query to an image URL. Never fails: provider and
    /// storage trouble degrade through the tiers down to the placeholder.
    pub async fn resolve(&self, query: &str) -> String {
        let normalized = normalize_query(query);

        if let Some(url) = self.get_cached(&normalized) {
            log::debug!("Cache hit: {}", normalized);
            return url;
        }

        // Single-flight: join an in-progress resolution of the same key
        let waiter = {
            let mut inflight = match self.inflight.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            match inflight.get(&normalized) {
                Some(tx) => Some(tx.subscribe()),
                None => {
                    let (tx, _) = broadcast::channel(1);
                    inflight.insert(normalized.clone(), tx);
                    None
                }
            }
        };

        if let Some(mut rx) = waiter {
            match rx.recv().await {
                Ok(url) => return url,
                // Leader was dropped mid-flight; resolve independently
                Err(_) => return self.resolve_via_tiers(query, &normalized).await,
            }
        }

        let flight = FlightGuard {
            inflight: &self.inflight,
            key: normalized.clone(),
            published: false,
        };
        let url = self.resolve_via_tiers(query, &normalized).await;
        flight.publish(&url);
        url
    }

    /// Walk the escalation tiers: cache sub-key first, then the provider,
    /// then this tier's selection policy. At most one network call per tier.
    async fn resolve_via_tiers(&self, raw: &str, normalized: &str) -> String {
        for tier in SearchTier::ORDER {
            let tier_key = tier.cache_key(normalized);
            if let Some(url) = self.get_cached(&tier_key) {
                log::debug!("Cache hit: {}", tier_key);
                return url;
            }

            match self
                .client
                .search(&tier.provider_query(raw), tier.per_page())
                .await
            {
                Ok(photos) => {
                    if let Some(url) = tier.select(&photos, raw, self.picker.as_ref()) {
                        self.set_cached(&tier_key, &url);
                        return url;
                    }
                    log::debug!("No acceptable candidate at {:?} tier for {:?}", tier, normalized);
                }
                Err(err) => {
                    log::warn!(
                        "Photo search failed at {:?} tier for {:?}: {}",
                        tier,
                        normalized,
                        err
                    );
                }
            }
        }

        placeholder_url(raw)
    }

    fn get_cached(&self, key: &str) -> Option<String> {
        let cache = self.cache.as_ref()?;
        let guard = cache.lock().ok()?;
        guard.get(key).ok().flatten()
    }

    fn set_cached(&self, key: &str, url: &str) {
        if let Some(ref cache) = self.cache
            && let Ok(guard) = cache.lock()
            && let Err(err) = guard.put(key, url)
        {
            log::warn!("Image cache write failed for {:?}: {}", key, err);
        }
    }
}

/// Releases the single-flight slot. Publishing hands the URL to waiting
/// followers; dropping without publishing (the leader was cancelled) closes
/// the channel so followers resolve on their own instead of hanging.
struct FlightGuard<'a> {
    inflight: &'a Mutex<HashMap<String, broadcast::Sender<String>>>,
    key: String,
    published: bool,
}

impl FlightGuard<'_> {
    fn publish(mut self, url: &str) {
        if let Ok(mut inflight) = self.inflight.lock()
            && let Some(tx) = inflight.remove(&self.key)
        {
            let _ = tx.send(url.to_string());
        }
        self.published = true;
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.published
            && let Ok(mut inflight) = self.inflight.lock()
        {
            inflight.remove(&self.key);
        }
    }
}
