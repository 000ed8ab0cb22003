//! Core traits for external collaborators

use crate::error::Result;
use crate::types::{VideoId, VideoMetadata};
use async_trait::async_trait;

/// Canonical metadata lookup for an external video identifier.
///
/// Implemented by the importer's proxy client; consumed by the bulk
/// metadata refresh in the persistence adapter.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch canonical title/artist/thumbnail for a video.
    ///
    /// Fails when the metadata service is unreachable or errors; callers
    /// decide whether to fall back to placeholder data.
    async fn fetch_metadata(&self, video_id: &VideoId) -> Result<VideoMetadata>;
}
