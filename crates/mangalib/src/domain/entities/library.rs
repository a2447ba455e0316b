use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::manga::{MangaDetail, MangaId, MangaSource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub id: MangaId,
    pub title: String,
    pub thumbnail: String,
    #[serde(default)]
    pub description: String,
    pub source: MangaSource,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl FavoriteEntry {
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

impl From<MangaDetail> for FavoriteEntry {
    fn from(detail: MangaDetail) -> Self {
        Self {
            id: detail.summary.id,
            title: detail.summary.title,
            thumbnail: detail.summary.thumbnail,
            description: detail.summary.description,
            source: detail.summary.source,
            genres: detail.genres,
        }
    }
}

/// How far a manga has been read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingProgress {
    pub chapter: String,
    pub page: u32,
    /// Percentage of the chapter read, 0 to 100.
    pub progress: f32,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}
