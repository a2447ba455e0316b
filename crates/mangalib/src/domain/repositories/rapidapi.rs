use async_trait::async_trait;
use mangalib_upstream::mangaverse::FetchQuery;
use serde_json::Value;

use super::UpstreamError;

/// Services reached through RapidAPI with the server-held key.
#[async_trait]
pub trait RapidApiRepository: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn fetch_mangaverse(&self, query: &FetchQuery) -> Result<Value, UpstreamError>;

    async fn manga_genres(&self) -> Result<Value, UpstreamError>;

    async fn animedb_manga_raw(&self) -> Result<String, UpstreamError>;
}
