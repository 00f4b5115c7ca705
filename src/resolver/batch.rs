//! Batch resolution for screens that populate many destination cards at once
//!
//! Fans every item out to a concurrent [`ImageResolver::resolve`] call and
//! staggers only the *assignment* of results, so cards don't all pop in on
//! the same frame while the underlying network calls still overlap freely.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{FuturesUnordered, StreamExt};
use tokio_util::sync::CancellationToken;

use super::{ImageResolver, placeholder_url};
use crate::client::PhotoSearchApi;

/// Default per-item assignment delay, multiplied by the item's index.
pub const ASSIGN_STAGGER: Duration = Duration::from_millis(80);

/// One destination awaiting an image
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Caller's handle for routing the result back to its card
    pub id: String,
    /// Free-text travel query, e.g. "<place name> <region>"
    pub query: String,
}

/// A resolved batch entry, delivered in assignment order
#[derive(Debug, Clone)]
pub struct BatchImage {
    pub id: String,
    pub query: String,
    pub url: String,
}

/// Resolve a batch with the default stagger and no assignment callback.
#[allow(dead_code)]
pub async fn resolve_batch<C: PhotoSearchApi>(
    resolver: &Arc<ImageResolver<C>>,
    items: Vec<BatchItem>,
    cancel: &CancellationToken,
) -> Vec<BatchImage> {
    resolve_batch_with(resolver, items, cancel, ASSIGN_STAGGER, |_| {}).await
}

/// Resolve a batch of destinations concurrently.
///
/// Every item gets its own resolver call with no concurrency cap beyond the
/// batch size; a batch is not atomic, so one item settling on its placeholder
/// never blocks or rolls back siblings. `on_assign` fires per item as its
/// staggered assignment lands (progress bars, incremental UI updates).
///
/// Cancelling the token settles all unfinished items on their placeholder
/// URLs immediately: consumers always receive one URL per item.
pub async fn resolve_batch_with<C, F>(
    resolver: &Arc<ImageResolver<C>>,
    items: Vec<BatchItem>,
    cancel: &CancellationToken,
    stagger: Duration,
    mut on_assign: F,
) -> Vec<BatchImage>
where
    C: PhotoSearchApi,
    F: FnMut(&BatchImage),
{
    let mut pending: FuturesUnordered<_> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let resolver = Arc::clone(resolver);
            let cancel = cancel.clone();
            async move {
                let url = tokio::select! {
                    _ = cancel.cancelled() => placeholder_url(&item.query),
                    url = resolver.resolve(&item.query) => url,
                };

                // Stagger assignment, not resolution; a torn-down batch
                // skips the wait
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = tokio::time::sleep(stagger * index as u32) => {}
                }

                BatchImage {
                    id: item.id,
                    query: item.query,
                    url,
                }
            }
        })
        .collect();

    let mut resolved = Vec::new();
    while let Some(image) = pending.next().await {
        on_assign(&image);
        resolved.push(image);
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ImageCacheStore;
    use crate::client::{MockPhotoClient, Photo};
    use tempfile::TempDir;

    fn items(queries: &[&str]) -> Vec<BatchItem> {
        queries
            .iter()
            .enumerate()
            .map(|(i, q)| BatchItem {
                id: format!("place-{}", i),
                query: q.to_string(),
            })
            .collect()
    }

    fn test_resolver(mock: MockPhotoClient) -> (Arc<ImageResolver<MockPhotoClient>>, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ImageCacheStore::open_at(dir.path(), "test_images").unwrap();
        let resolver = ImageResolver::with_store(mock, Some(store)).with_picker(Box::new(|_| 0));
        (Arc::new(resolver), dir)
    }

    #[tokio::test]
    async fn test_batch_resolves_every_item() {
        let mock = MockPhotoClient::new()
            .with_response(
                "Goa Beach travel destination landmark",
                vec![Photo::new("goa beach landscape", "https://img.test/goa.jpg")],
            )
            .with_response(
                "Manali Hills travel destination landmark",
                vec![Photo::new("manali mountain scenic", "https://img.test/manali.jpg")],
            );
        let (resolver, _dir) = test_resolver(mock);

        let batch = items(&["Goa Beach", "Manali Hills"]);
        let cancel = CancellationToken::new();
        let resolved =
            resolve_batch_with(&resolver, batch, &cancel, Duration::ZERO, |_| {}).await;

        assert_eq!(resolved.len(), 2);
        let urls: Vec<_> = resolved.iter().map(|r| r.url.as_str()).collect();
        assert!(urls.contains(&"https://img.test/goa.jpg"));
        assert!(urls.contains(&"https://img.test/manali.jpg"));
    }

    #[tokio::test]
    async fn test_failed_item_settles_on_placeholder_without_blocking_siblings() {
        let mock = MockPhotoClient::new().with_response(
            "Goa Beach travel destination landmark",
            vec![Photo::new("goa beach landscape", "https://img.test/goa.jpg")],
        );
        let (resolver, _dir) = test_resolver(mock);

        let batch = items(&["Goa Beach", "zzz-nowhere"]);
        let cancel = CancellationToken::new();
        let resolved =
            resolve_batch_with(&resolver, batch, &cancel, Duration::ZERO, |_| {}).await;

        assert_eq!(resolved.len(), 2);
        let by_id = |id: &str| resolved.iter().find(|r| r.id == id).unwrap();
        assert_eq!(by_id("place-0").url, "https://img.test/goa.jpg");
        assert!(by_id("place-1").url.contains("zzz-nowhere"));
    }

    #[tokio::test]
    async fn test_cancelled_batch_settles_on_placeholders_without_network() {
        let (resolver, _dir) = test_resolver(MockPhotoClient::new());

        let cancel = CancellationToken::new();
        cancel.cancel();

        let batch = items(&["Goa Beach", "Manali Hills"]);
        let resolved =
            resolve_batch_with(&resolver, batch, &cancel, Duration::ZERO, |_| {}).await;

        assert_eq!(resolved.len(), 2);
        assert!(resolved.iter().all(|r| r.url.contains("via.placeholder.com")));
        assert_eq!(resolver.client.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_assignment_is_staggered_by_index() {
        let (resolver, _dir) = test_resolver(MockPhotoClient::new());

        let batch = items(&["aaa one", "bbb two", "ccc three"]);
        let cancel = CancellationToken::new();
        let resolved =
            resolve_batch_with(&resolver, batch, &cancel, Duration::from_millis(30), |_| {})
                .await;

        // Instant resolutions land in index order once the stagger is applied
        let ids: Vec<_> = resolved.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["place-0", "place-1", "place-2"]);
    }

    #[tokio::test]
    async fn test_on_assign_fires_per_item() {
        let (resolver, _dir) = test_resolver(MockPhotoClient::new());

        let batch = items(&["aaa", "bbb"]);
        let cancel = CancellationToken::new();
        let mut assigned = 0;
        resolve_batch_with(&resolver, batch, &cancel, Duration::ZERO, |_| assigned += 1).await;

        assert_eq!(assigned, 2);
    }
}
