//! Photo-search provider client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod pexels;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockPhotoClient;
pub use pexels::PexelsClient;

/// Photo-search provider trait
///
/// One operation: free-text search returning candidate photos in provider
/// order. Orientation is pinned to landscape by the implementation since
/// every consumer is a destination card or map popup.
#[async_trait]
pub trait PhotoSearchApi: Send + Sync {
    /// Search for photos matching a free-text query
    async fn search(&self, query: &str, per_page: u8) -> Result<Vec<Photo>>;
}

/// A candidate photo returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    /// Free-text description of the photo (Pexels `alt`), may be missing
    #[serde(default)]
    pub alt: Option<String>,

    /// Available renditions of the photo
    pub src: PhotoSource,
}

/// URLs for the photo renditions we care about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoSource {
    /// Medium-sized rendition, the one assigned to UI surfaces
    pub medium: String,
}

impl Photo {
    #[allow(dead_code)]
    pub fn new(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            alt: Some(alt.into()),
            src: PhotoSource { medium: url.into() },
        }
    }

    /// Description text used for relevance scoring; absent alt scores as empty
    pub fn description(&self) -> &str {
        self.alt.as_deref().unwrap_or("")
    }
}
