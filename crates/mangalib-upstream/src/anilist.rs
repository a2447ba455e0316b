use serde::Deserialize;
use serde_json::json;

use crate::{Error, Listing, Result, read_json, trim_base_url};

pub const NAME: &str = "anilist";
pub const API_URL: &str = "https://graphql.anilist.co";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct CoverImage {
    #[serde(deserialize_with = "crate::or_default")]
    pub large: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub medium: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct MediaTitle {
    #[serde(deserialize_with = "crate::or_default")]
    pub romaji: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub english: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub native: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Media {
    #[serde(deserialize_with = "crate::or_default")]
    pub id: i64,
    #[serde(deserialize_with = "crate::or_default")]
    pub title: MediaTitle,
    #[serde(deserialize_with = "crate::or_default")]
    pub description: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub cover_image: CoverImage,
    #[serde(deserialize_with = "crate::or_default")]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct MediaPage {
    media: Option<Vec<Media>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PageData {
    page: Option<MediaPage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MediaData {
    media: Option<Media>,
}

#[derive(Debug, Clone)]
pub struct AniList {
    client: reqwest::Client,
    api_url: String,
}

impl Default for AniList {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), API_URL)
    }
}

impl AniList {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
        }
    }

    /// Non-adult manga by global popularity.
    pub async fn popular_manga(&self, per_page: usize) -> Result<Listing<Media>> {
        const QUERY: &str = "
        query PopularManga($perPage: Int) {
            Page(perPage: $perPage) {
              media(type: MANGA, sort: POPULARITY_DESC, isAdult: false) {
                id
                title {
                  romaji
                  english
                  native
                }
                description
                coverImage {
                  large
                }
                genres
              }
            }
          }
        ";

        let (status, res) = self
            .post_graphql::<PageData>(&json!({
                "query": QUERY,
                "variables": {
                    "perPage": per_page
                }
            }))
            .await?;

        let items = res
            .and_then(|data| data.page)
            .and_then(|page| page.media)
            .unwrap_or_default();
        debug!("{NAME}: {} media", items.len());

        Ok(Listing { status, items })
    }

    pub async fn get_media(&self, id: i64) -> Result<Option<Media>> {
        const QUERY: &str = "
        query GetManga($id: Int) {
            Media(id: $id, type: MANGA) {
              id
              title {
                romaji
                english
                native
              }
              description
              coverImage {
                large
              }
              genres
            }
          }
        ";

        let (_, res) = self
            .post_graphql::<MediaData>(&json!({
                "query": QUERY,
                "variables": {
                    "id": id
                }
            }))
            .await?;

        Ok(res.and_then(|data| data.media))
    }

    async fn post_graphql<T>(&self, body: &serde_json::Value) -> Result<(u16, Option<T>)>
    where
        T: serde::de::DeserializeOwned,
    {
        let res = self
            .client
            .post(&self.api_url)
            .json(body)
            .send()
            .await?;

        let (status, res) = read_json::<GraphQLResponse<T>>(res).await?;
        if res.data.is_none() {
            if let Some(error) = res.errors.into_iter().next() {
                return Err(Error::Api(error.message));
            }
        }

        Ok((status, res.data))
    }
}
