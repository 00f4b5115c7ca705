//! Pexels API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use super::{Photo, PhotoSearchApi};
use crate::error::{ApiError, Result};

/// Pexels API base URL
const API_BASE_URL: &str = "https://api.pexels.com/v1";

/// Client-side throttle. Pexels meters per hour; pacing bursts keeps a busy
/// batch screen from burning the whole quota in one scroll.
const RATE_LIMIT_PER_SECOND: u32 = 5;

/// All consumers render landscape card imagery
const ORIENTATION: &str = "landscape";

/// Pexels photo-search client
pub struct PexelsClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

/// Wire shape of a Pexels search response
#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

impl PexelsClient {
    /// Create a new Pexels client against the production API
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_host(api_key, None)
    }

    /// Create a client with a custom API host (for development/testing)
    pub fn with_host(api_key: String, host: Option<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: host.unwrap_or_else(|| API_BASE_URL.to_string()),
            api_key,
            rate_limiter,
        })
    }
}

#[async_trait]
impl PhotoSearchApi for PexelsClient {
    async fn search(&self, query: &str, per_page: u8) -> Result<Vec<Photo>> {
        // Apply rate limiting
        self.rate_limiter.until_ready().await;

        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .header("Authorization", &self.api_key)
            .query(&[
                ("query", query),
                ("per_page", &per_page.to_string()),
                ("orientation", ORIENTATION),
            ])
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        match status {
            StatusCode::OK => {
                let data = response.json::<SearchResponse>().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse search response: {}", e))
                })?;
                Ok(data.photos)
            }
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Resource not found".to_string());
                Err(ApiError::NotFound(error_msg).into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                Err(ApiError::RateLimit(Duration::from_secs(retry_after)).into())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            status if status.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", status));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }
}
