use mangalib_upstream::mangadex;
use serde::Serialize;

/// A MangaDex chapter as listed to the reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub chapter: Option<String>,
    pub title: Option<String>,
    pub translated_language: Option<String>,
    pub pages: Option<i64>,
}

impl From<mangadex::Chapter> for Chapter {
    fn from(ch: mangadex::Chapter) -> Self {
        Self {
            id: ch.id,
            chapter: ch.attributes.chapter,
            title: ch.attributes.title,
            translated_language: ch.attributes.translated_language,
            pages: ch.attributes.pages,
        }
    }
}

/// Page image URLs of one chapter, in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterImageSet {
    pub image_urls: Vec<String>,
}

impl From<&mangadex::AtHomeServer> for ChapterImageSet {
    fn from(server: &mangadex::AtHomeServer) -> Self {
        let base_url = server.base_url.trim_end_matches('/');
        let hash = &server.chapter.hash;

        Self {
            image_urls: server
                .chapter
                .data
                .iter()
                .map(|filename| format!("{base_url}/data/{hash}/{filename}"))
                .collect(),
        }
    }
}
