use serde::Deserialize;

use crate::{Listing, Result, read_json, trim_base_url};

pub const NAME: &str = "jikan";
pub const API_URL: &str = "https://api.jikan.moe/v4";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ImageSet {
    #[serde(deserialize_with = "crate::or_default")]
    pub image_url: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub small_image_url: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub large_image_url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Images {
    #[serde(deserialize_with = "crate::or_default")]
    pub jpg: ImageSet,
    #[serde(deserialize_with = "crate::or_default")]
    pub webp: ImageSet,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub mal_id: i64,
    #[serde(deserialize_with = "crate::or_default")]
    pub name: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Manga {
    #[serde(deserialize_with = "crate::or_default")]
    pub mal_id: i64,
    #[serde(deserialize_with = "crate::or_default")]
    pub title: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub title_english: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub synopsis: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub images: Images,
    #[serde(deserialize_with = "crate::or_default")]
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Deserialize)]
struct Data<T> {
    data: T,
}

#[derive(Debug, Clone)]
pub struct Jikan {
    client: reqwest::Client,
    api_url: String,
}

impl Default for Jikan {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), API_URL)
    }
}

impl Jikan {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
        }
    }

    pub async fn list_manga(&self, limit: usize) -> Result<Listing<Manga>> {
        let res = self
            .client
            .get(format!("{}/manga", self.api_url))
            .query(&[("limit", limit)])
            .send()
            .await?;

        let (status, page) = read_json::<Data<Option<Vec<Manga>>>>(res).await?;
        let items = page.data.unwrap_or_default();
        debug!("{NAME}: {} manga", items.len());

        Ok(Listing { status, items })
    }

    pub async fn get_manga(&self, id: i64) -> Result<Manga> {
        let res = self
            .client
            .get(format!("{}/manga/{id}", self.api_url))
            .send()
            .await?;

        let (_, manga) = read_json::<Data<Manga>>(res).await?;
        Ok(manga.data)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_null_images_decode() {
        let page: Data<Vec<Manga>> = serde_json::from_str(
            r#"{"data":[{"mal_id":1,"title":"Monster","images":null,"genres":null},{"mal_id":2,"images":{"jpg":null}}]}"#,
        )
        .unwrap();

        assert_eq!(page.data.len(), 2);
        assert!(page.data[0].images.jpg.image_url.is_none());
        assert!(page.data[0].genres.is_empty());
        assert!(page.data[1].images.jpg.large_image_url.is_none());
    }
}
