use async_trait::async_trait;
use mangalib_upstream::{Jikan, Listing, jikan::Manga};

use crate::{
    domain::repositories::{UpstreamError, jikan::JikanRepository},
    infrastructure::config::Config,
};

#[derive(Clone)]
pub struct JikanRepositoryImpl {
    client: Jikan,
}

impl JikanRepositoryImpl {
    pub fn new(client: Jikan) -> Self {
        Self { client }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(Jikan::new(client, &config.upstream.jikan_api))
    }
}

#[async_trait]
impl JikanRepository for JikanRepositoryImpl {
    async fn list_manga(&self, limit: usize) -> Result<Listing<Manga>, UpstreamError> {
        self.client.list_manga(limit).await
    }

    async fn get_manga(&self, id: i64) -> Result<Manga, UpstreamError> {
        self.client.get_manga(id).await
    }
}
