use async_trait::async_trait;
use mangalib_upstream::{Listing, jikan::Manga};

use super::UpstreamError;

#[async_trait]
pub trait JikanRepository: Send + Sync {
    async fn list_manga(&self, limit: usize) -> Result<Listing<Manga>, UpstreamError>;

    async fn get_manga(&self, id: i64) -> Result<Manga, UpstreamError>;
}
