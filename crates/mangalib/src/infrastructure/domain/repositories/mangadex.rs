use async_trait::async_trait;
use mangalib_upstream::{
    Listing, MangaDex,
    mangadex::{AtHomeServer, Chapter, ChapterQuery, Manga},
};

use crate::{
    domain::repositories::{UpstreamError, mangadex::MangaDexRepository},
    infrastructure::config::Config,
};

#[derive(Clone)]
pub struct MangaDexRepositoryImpl {
    client: MangaDex,
}

impl MangaDexRepositoryImpl {
    pub fn new(client: MangaDex) -> Self {
        Self { client }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(MangaDex::new(
            client,
            &config.upstream.mangadex_api,
            &config.upstream.mangadex_uploads,
        ))
    }
}

#[async_trait]
impl MangaDexRepository for MangaDexRepositoryImpl {
    async fn list_latest_manga(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Listing<Manga>, UpstreamError> {
        self.client.list_latest_manga(limit, offset).await
    }

    async fn get_manga(&self, id: &str) -> Result<Manga, UpstreamError> {
        self.client.get_manga(id).await
    }

    async fn get_cover_file_name(&self, cover_id: &str) -> Result<Option<String>, UpstreamError> {
        let cover = self.client.get_cover(cover_id).await?;

        Ok(cover.attributes.file_name)
    }

    async fn list_chapters(&self, query: &ChapterQuery) -> Result<Vec<Chapter>, UpstreamError> {
        self.client.list_chapters(query).await
    }

    async fn get_at_home_server(&self, chapter_id: &str) -> Result<AtHomeServer, UpstreamError> {
        self.client.get_at_home_server(chapter_id).await
    }

    fn cover_url(&self, manga_id: &str, file_name: &str) -> String {
        self.client.cover_url(manga_id, file_name)
    }
}
