use async_trait::async_trait;
use mangalib_upstream::{Listing, anilist::Media};

use super::UpstreamError;

#[async_trait]
pub trait AniListRepository: Send + Sync {
    async fn popular_manga(&self, per_page: usize) -> Result<Listing<Media>, UpstreamError>;

    async fn get_media(&self, id: i64) -> Result<Option<Media>, UpstreamError>;
}
