use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Listing, Result, read_json, trim_base_url};

pub const NAME: &str = "mangadex";
pub const API_URL: &str = "https://api.mangadex.org";
pub const UPLOADS_URL: &str = "https://uploads.mangadex.org";

/// Language-keyed strings, kept in document order.
pub type LocalizedString = Map<String, Value>;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationshipAttributes {
    #[serde(deserialize_with = "crate::or_default")]
    pub file_name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Relationship {
    pub id: String,
    #[serde(rename = "type")]
    #[serde(deserialize_with = "crate::or_default")]
    pub kind: String,
    #[serde(deserialize_with = "crate::or_default")]
    pub attributes: Option<RelationshipAttributes>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct TagAttributes {
    #[serde(deserialize_with = "crate::or_default")]
    pub name: LocalizedString,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub id: String,
    #[serde(deserialize_with = "crate::or_default")]
    pub attributes: TagAttributes,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MangaAttributes {
    #[serde(deserialize_with = "crate::or_default")]
    pub title: LocalizedString,
    #[serde(deserialize_with = "crate::or_default")]
    pub description: LocalizedString,
    #[serde(deserialize_with = "crate::or_default")]
    pub tags: Vec<Tag>,
    #[serde(deserialize_with = "crate::or_default")]
    pub latest_uploaded_chapter: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Manga {
    #[serde(deserialize_with = "crate::or_default")]
    pub id: String,
    #[serde(deserialize_with = "crate::or_default")]
    pub attributes: MangaAttributes,
    #[serde(deserialize_with = "crate::or_default")]
    pub relationships: Vec<Relationship>,
}

impl Manga {
    pub fn cover_art(&self) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.kind == "cover_art")
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CoverAttributes {
    #[serde(deserialize_with = "crate::or_default")]
    pub file_name: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Cover {
    pub id: String,
    #[serde(deserialize_with = "crate::or_default")]
    pub attributes: CoverAttributes,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChapterAttributes {
    pub chapter: Option<String>,
    #[serde(deserialize_with = "crate::or_default")]
    pub title: Option<String>,
    pub translated_language: Option<String>,
    pub pages: Option<i64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct Chapter {
    pub id: String,
    #[serde(deserialize_with = "crate::or_default")]
    pub attributes: ChapterAttributes,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AtHomeChapter {
    pub hash: String,
    pub data: Vec<String>,
    pub data_saver: Vec<String>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtHomeServer {
    pub base_url: String,
    pub chapter: AtHomeChapter,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Collection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entity<T> {
    pub data: T,
}

/// Filters for the chapter feed of one manga.
#[derive(Debug, Clone)]
pub struct ChapterQuery {
    pub manga_id: String,
    pub limit: usize,
    pub translated_language: Option<String>,
}

impl ChapterQuery {
    pub fn new(manga_id: &str, limit: usize) -> Self {
        Self {
            manga_id: manga_id.to_string(),
            limit,
            translated_language: None,
        }
    }

    pub fn language(self, language: &str) -> Self {
        Self {
            translated_language: Some(language.to_string()),
            ..self
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("manga", self.manga_id.clone()),
            ("limit", self.limit.to_string()),
            ("order[chapter]", "asc".to_string()),
        ];
        if let Some(language) = self.translated_language.as_ref() {
            params.push(("translatedLanguage[]", language.clone()));
        }

        params
    }
}

#[derive(Debug, Clone)]
pub struct MangaDex {
    client: reqwest::Client,
    api_url: String,
    uploads_url: String,
}

impl Default for MangaDex {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), API_URL, UPLOADS_URL)
    }
}

impl MangaDex {
    pub fn new(
        client: reqwest::Client,
        api_url: impl Into<String>,
        uploads_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
            uploads_url: trim_base_url(uploads_url),
        }
    }

    /// Manga sorted by their latest uploaded chapter, newest first.
    pub async fn list_latest_manga(&self, limit: usize, offset: usize) -> Result<Listing<Manga>> {
        let res = self
            .client
            .get(format!("{}/manga", self.api_url))
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("order[latestUploadedChapter]", "desc".to_string()),
            ])
            .send()
            .await?;

        let (status, collection) = read_json::<Collection<Manga>>(res).await?;
        debug!(
            "{NAME}: {} manga at offset {offset} of {}",
            collection.data.len(),
            collection.total
        );

        Ok(Listing {
            status,
            items: collection.data,
        })
    }

    pub async fn get_manga(&self, id: &str) -> Result<Manga> {
        let res = self
            .client
            .get(format!("{}/manga/{id}", self.api_url))
            .query(&[("includes[]", "cover_art")])
            .send()
            .await?;

        let (_, entity) = read_json::<Entity<Manga>>(res).await?;
        Ok(entity.data)
    }

    pub async fn get_cover(&self, cover_id: &str) -> Result<Cover> {
        let res = self
            .client
            .get(format!("{}/cover/{cover_id}", self.api_url))
            .send()
            .await?;

        let (_, entity) = read_json::<Entity<Cover>>(res).await?;
        Ok(entity.data)
    }

    pub async fn list_chapters(&self, query: &ChapterQuery) -> Result<Vec<Chapter>> {
        let res = self
            .client
            .get(format!("{}/chapter", self.api_url))
            .query(&query.params())
            .send()
            .await?;

        let (_, collection) = read_json::<Collection<Chapter>>(res).await?;
        Ok(collection.data)
    }

    pub async fn get_at_home_server(&self, chapter_id: &str) -> Result<AtHomeServer> {
        let res = self
            .client
            .get(format!("{}/at-home/server/{chapter_id}", self.api_url))
            .send()
            .await?;

        let (_, server) = read_json::<AtHomeServer>(res).await?;
        Ok(server)
    }

    /// Thumbnail-sized cover on the uploads CDN.
    pub fn cover_url(&self, manga_id: &str, file_name: &str) -> String {
        format!("{}/covers/{manga_id}/{file_name}.256.jpg", self.uploads_url)
    }
}
