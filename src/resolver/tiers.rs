//! Escalating search tiers
//!
//! Three ordered strategies for turning a travel query into a provider
//! search, tried in order until one yields an acceptable photo. Each tier
//! owns its query construction, page size, cache sub-key, and selection
//! policy.

use super::score::{ACCEPT_THRESHOLD, pick_best};
use crate::client::Photo;

/// Picks an index in `0..bound`; injectable so tests stay deterministic.
pub type IndexPicker = dyn Fn(usize) -> usize + Send + Sync;

/// One of the three ordered fallback strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTier {
    /// Query enriched with landmark keywords; strict score-based acceptance
    Enriched,
    /// Place-name clause only; takes a pseudo-random pick among the top hits
    /// for variety across cards
    Specific,
    /// Raw query as a last resort; skips the single most-generic hit
    Basic,
}

impl SearchTier {
    /// Escalation order
    pub const ORDER: [SearchTier; 3] = [SearchTier::Enriched, SearchTier::Specific, SearchTier::Basic];

    /// Build the provider query for this tier from the raw travel query
    pub fn provider_query(&self, raw: &str) -> String {
        match self {
            SearchTier::Enriched => format!("{} travel destination landmark", raw),
            SearchTier::Specific => {
                // "Lake Palace, Udaipur" and "Lake Palace in Udaipur" both
                // reduce to their leading place-name clause
                let clause = raw
                    .split(',')
                    .next()
                    .and_then(|c| c.split(" in ").next())
                    .unwrap_or(raw)
                    .trim();
                format!("{} tourist destination", clause)
            }
            SearchTier::Basic => raw.to_string(),
        }
    }

    /// Page size requested from the provider at this tier
    pub fn per_page(&self) -> u8 {
        match self {
            SearchTier::Enriched => 15,
            SearchTier::Specific => 8,
            SearchTier::Basic => 5,
        }
    }

    /// Cache key for this tier, derived from the normalized query key
    pub fn cache_key(&self, normalized: &str) -> String {
        match self {
            SearchTier::Enriched => normalized.to_string(),
            SearchTier::Specific => format!("{}_specific", normalized),
            SearchTier::Basic => format!("{}_basic", normalized),
        }
    }

    /// Apply this tier's selection policy to a batch of candidates.
    ///
    /// `None` means the tier rejects the batch (empty, or below the score
    /// threshold at the enriched tier) and control escalates.
    pub fn select(&self, photos: &[Photo], raw_query: &str, picker: &IndexPicker) -> Option<String> {
        if photos.is_empty() {
            return None;
        }
        match self {
            SearchTier::Enriched => {
                let (best, best_score) = pick_best(photos, raw_query)?;
                if best_score > ACCEPT_THRESHOLD {
                    Some(best.src.medium.clone())
                } else {
                    None
                }
            }
            SearchTier::Specific => {
                let idx = picker(photos.len().min(3)).min(photos.len() - 1);
                Some(photos[idx].src.medium.clone())
            }
            SearchTier::Basic => {
                let idx = 1.min(photos.len() - 1);
                Some(photos[idx].src.medium.clone())
            }
        }
    }
}
