//! Mock photo provider for testing
//!
//! Canned per-query responses, scripted failures, and optional artificial
//! latency, with every search recorded for call-count assertions.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tokio::sync::Mutex;

use super::{Photo, PhotoSearchApi};
use crate::error::{ApiError, Result};

/// A recorded provider call, kept in issue order
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    pub query: String,
    pub per_page: u8,
}

/// Mock photo provider.
///
/// Queries without a canned response return an empty candidate list, which is
/// exactly the provider's zero-result shape.
///
/// # Example
/// ```ignore
/// let mock = MockPhotoClient::new()
///     .with_response("goa beach travel destination landmark", vec![Photo::new("beach", "https://a")]);
/// let photos = mock.search("goa beach travel destination landmark", 15).await?;
/// assert_eq!(mock.call_count().await, 1);
/// ```
pub struct MockPhotoClient {
    responses: Mutex<HashMap<String, Vec<Photo>>>,
    fail_queries: Mutex<HashSet<String>>,
    latency: Mutex<Option<Duration>>,
    calls: Mutex<Vec<RecordedSearch>>,
}

impl Default for MockPhotoClient {
    fn default() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            fail_queries: Mutex::new(HashSet::new()),
            latency: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl MockPhotoClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canned response for an exact provider query
    pub fn with_response(mut self, query: impl Into<String>, photos: Vec<Photo>) -> Self {
        self.responses.get_mut().insert(query.into(), photos);
        self
    }

    /// Make an exact provider query fail with a server error
    pub fn with_failure(mut self, query: impl Into<String>) -> Self {
        self.fail_queries.get_mut().insert(query.into());
        self
    }

    /// Add artificial latency to every search (for overlap/concurrency tests)
    pub fn with_latency(mut self, latency: Duration) -> Self {
        *self.latency.get_mut() = Some(latency);
        self
    }

    /// Total number of provider calls issued
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// All recorded calls in issue order
    pub async fn calls(&self) -> Vec<RecordedSearch> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl PhotoSearchApi for MockPhotoClient {
    async fn search(&self, query: &str, per_page: u8) -> Result<Vec<Photo>> {
        self.calls.lock().await.push(RecordedSearch {
            query: query.to_string(),
            per_page,
        });

        let latency = *self.latency.lock().await;
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.fail_queries.lock().await.contains(query) {
            return Err(ApiError::ServerError("mock provider failure".to_string()).into());
        }

        Ok(self
            .responses
            .lock()
            .await
            .get(query)
            .cloned()
            .unwrap_or_default())
    }
}
