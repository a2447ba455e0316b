use serde_json::Value;

use crate::{Result, rapidapi, read_json, trim_base_url};

pub const NAME: &str = "myanimelist";
pub const API_URL: &str = "https://myanimelist.p.rapidapi.com";

/// MyAnimeList served through RapidAPI.
#[derive(Debug, Clone)]
pub struct MyAnimeList {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl MyAnimeList {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn manga_genres(&self) -> Result<Value> {
        let req = self
            .client
            .get(format!("{}/v2/manga/genres", self.api_url));

        let res = rapidapi::authorize(req, &self.api_url, self.api_key.as_ref(), NAME)?
            .send()
            .await?;

        let (_, genres) = read_json(res).await?;
        Ok(genres)
    }
}
