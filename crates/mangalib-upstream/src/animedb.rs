use crate::{Result, rapidapi, trim_base_url};

pub const NAME: &str = "animedb";
pub const API_URL: &str = "https://animedb1.p.rapidapi.com";

#[derive(Debug, Clone)]
pub struct AnimeDb {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl AnimeDb {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
            api_key,
        }
    }

    /// Raw manga listing body, whatever status it came with.
    pub async fn manga_raw(&self) -> Result<String> {
        let req = self.client.get(format!("{}/manga", self.api_url));

        let res = rapidapi::authorize(req, &self.api_url, self.api_key.as_ref(), NAME)?
            .send()
            .await?;

        debug!("{NAME}: status {}", res.status());

        Ok(res.text().await?)
    }
}
