use async_trait::async_trait;
use mangalib_upstream::{
    Listing,
    mangadex::{AtHomeServer, Chapter, ChapterQuery, Manga},
};

use super::UpstreamError;

#[async_trait]
pub trait MangaDexRepository: Send + Sync {
    async fn list_latest_manga(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Listing<Manga>, UpstreamError>;

    async fn get_manga(&self, id: &str) -> Result<Manga, UpstreamError>;

    async fn get_cover_file_name(&self, cover_id: &str) -> Result<Option<String>, UpstreamError>;

    async fn list_chapters(&self, query: &ChapterQuery) -> Result<Vec<Chapter>, UpstreamError>;

    async fn get_at_home_server(&self, chapter_id: &str) -> Result<AtHomeServer, UpstreamError>;

    fn cover_url(&self, manga_id: &str, file_name: &str) -> String;
}
