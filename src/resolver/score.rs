//! Relevance scoring for candidate photos
//!
//! Provider results are unranked for our purposes: a search for a destination
//! happily returns portraits, parked cars, and restaurant interiors. Scoring
//! rewards landmark-style imagery and token overlap with the query so the
//! resolver can pick the one photo worth putting on a card.

use crate::client::Photo;

/// A candidate scores as acceptable iff strictly above this threshold.
pub const ACCEPT_THRESHOLD: i32 = -50;

/// Terms that almost always mean the photo is about a subject, not a place
const EXCLUDE_STRONG: [&str; 9] = [
    "person", "people", "man", "woman", "car", "vehicle", "portrait", "face", "selfie",
];

/// Terms that merely suggest the wrong framing
const EXCLUDE_LIGHT: [&str; 4] = ["indoor", "restaurant", "closeup", "close-up"];

/// Destination/landmark signals
const POSITIVE: [&str; 11] = [
    "landscape",
    "city",
    "architecture",
    "building",
    "landmark",
    "monument",
    "temple",
    "beach",
    "mountain",
    "view",
    "scenic",
];

/// Score a photo description against the original query.
///
/// Pure function; matching is case-insensitive substring containment, the
/// positive and token bonuses are additive and uncapped.
pub fn score(description: &str, query: &str) -> i32 {
    let description = description.to_lowercase();
    let mut score = 0;

    if EXCLUDE_STRONG.iter().any(|term| description.contains(term)) {
        score -= 100;
    }
    if EXCLUDE_LIGHT.iter().any(|term| description.contains(term)) {
        score -= 30;
    }

    for term in POSITIVE {
        if description.contains(term) {
            score += 20;
        }
    }

    for token in query.to_lowercase().split_whitespace() {
        if token.len() > 3 && description.contains(token) {
            score += 30;
        }
    }

    score
}

/// Pick the best-scoring candidate. Ties keep provider order (first seen
/// wins), so the sort is effectively stable without one.
pub fn pick_best<'a>(photos: &'a [Photo], query: &str) -> Option<(&'a Photo, i32)> {
    let mut best: Option<(&Photo, i32)> = None;
    for photo in photos {
        let photo_score = score(photo.description(), query);
        match best {
            Some((_, best_score)) if photo_score <= best_score => {}
            _ => best = Some((photo, photo_score)),
        }
    }
    best
}
