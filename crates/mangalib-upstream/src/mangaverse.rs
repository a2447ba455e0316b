use serde_json::Value;

use crate::{Result, rapidapi, read_json, trim_base_url};

pub const NAME: &str = "mangaverse";
pub const API_URL: &str = "https://mangaverse-api.p.rapidapi.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchQuery {
    pub page: String,
    pub genres: String,
    pub nsfw: String,
    pub kind: String,
}

impl Default for FetchQuery {
    fn default() -> Self {
        Self {
            page: "1".to_string(),
            genres: "Harem,Fantasy".to_string(),
            nsfw: "true".to_string(),
            kind: "all".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mangaverse {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl Mangaverse {
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

    pub async fn fetch_manga(&self, query: &FetchQuery) -> Result<Value> {
        let req = self
            .client
            .get(format!("{}/manga/fetch", self.api_url))
            .query(&[
                ("page", &query.page),
                ("genres", &query.genres),
                ("nsfw", &query.nsfw),
                ("type", &query.kind),
            ]);

        let res = rapidapi::authorize(req, &self.api_url, self.api_key.as_ref(), NAME)?
            .send()
            .await?;

        let (_, data) = read_json(res).await?;
        Ok(data)
    }
}
