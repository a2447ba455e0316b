use async_trait::async_trait;
use mangalib_upstream::{AnimeDb, Mangaverse, MyAnimeList, mangaverse::FetchQuery};
use serde_json::Value;

use crate::{
    domain::repositories::{UpstreamError, rapidapi::RapidApiRepository},
    infrastructure::config::Config,
};

/// Mangaverse, MyAnimeList and AnimeDB all share one RapidAPI key.
#[derive(Clone)]
pub struct RapidApiRepositoryImpl {
    mangaverse: Mangaverse,
    myanimelist: MyAnimeList,
    animedb: AnimeDb,
}

impl RapidApiRepositoryImpl {
    pub fn new(mangaverse: Mangaverse, myanimelist: MyAnimeList, animedb: AnimeDb) -> Self {
        Self {
            mangaverse,
            myanimelist,
            animedb,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        let upstream = &config.upstream;
        let key = config.rapidapi_key.clone();

        Self::new(
            Mangaverse::new(client.clone(), &upstream.mangaverse_api, key.clone()),
            MyAnimeList::new(client.clone(), &upstream.myanimelist_api, key.clone()),
            AnimeDb::new(client, &upstream.animedb_api, key),
        )
    }
}

#[async_trait]
impl RapidApiRepository for RapidApiRepositoryImpl {
    fn is_configured(&self) -> bool {
        self.mangaverse.is_configured() && self.myanimelist.is_configured()
    }

    async fn fetch_mangaverse(&self, query: &FetchQuery) -> Result<Value, UpstreamError> {
        self.mangaverse.fetch_manga(query).await
    }

    async fn manga_genres(&self) -> Result<Value, UpstreamError> {
        self.myanimelist.manga_genres().await
    }

    async fn animedb_manga_raw(&self) -> Result<String, UpstreamError> {
        self.animedb.manga_raw().await
    }
}
