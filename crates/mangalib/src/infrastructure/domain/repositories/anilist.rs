use async_trait::async_trait;
use mangalib_upstream::{AniList, Listing, anilist::Media};

use crate::{
    domain::repositories::{UpstreamError, anilist::AniListRepository},
    infrastructure::config::Config,
};

#[derive(Clone)]
pub struct AniListRepositoryImpl {
    client: AniList,
}

impl AniListRepositoryImpl {
    pub fn new(client: AniList) -> Self {
        Self { client }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(AniList::new(client, &config.upstream.anilist_api))
    }
}

#[async_trait]
impl AniListRepository for AniListRepositoryImpl {
    async fn popular_manga(&self, per_page: usize) -> Result<Listing<Media>, UpstreamError> {
        self.client.popular_manga(per_page).await
    }

    async fn get_media(&self, id: i64) -> Result<Option<Media>, UpstreamError> {
        self.client.get_media(id).await
    }
}
