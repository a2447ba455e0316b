use std::{fmt, str::FromStr};

use mangalib_upstream::{anilist, jikan, mangadex};
use serde::{Deserialize, Serialize};

pub const UNTITLED: &str = "Untitled";
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MangaSource {
    MangaDex,
    Jikan,
    AniList,
}

impl fmt::Display for MangaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MangaSource::MangaDex => write!(f, "MangaDex"),
            MangaSource::Jikan => write!(f, "Jikan"),
            MangaSource::AniList => write!(f, "AniList"),
        }
    }
}

impl FromStr for MangaSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mangadex" => Ok(MangaSource::MangaDex),
            "jikan" => Ok(MangaSource::Jikan),
            "anilist" => Ok(MangaSource::AniList),
            _ => Err(format!("unknown source {s}")),
        }
    }
}

/// Source-native identifier: a UUID for MangaDex, an integer elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MangaId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for MangaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MangaId::Numeric(id) => write!(f, "{id}"),
            MangaId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// A manga record normalized across sources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaSummary {
    pub id: MangaId,
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub source: MangaSource,
    /// Only MangaDex records carry this key; the inner value may be null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_chapter: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MangaDetail {
    #[serde(flatten)]
    pub summary: MangaSummary,
    pub genres: Vec<String>,
}

/// First candidate that is present and not empty.
fn first_present<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}

fn localized<'a>(strings: &'a mangadex::LocalizedString, lang: &str) -> Option<&'a str> {
    strings.get(lang).and_then(|v| v.as_str())
}

impl MangaSummary {
    pub fn from_mangadex(manga: &mangadex::Manga, thumbnail: String) -> Self {
        let attributes = &manga.attributes;
        let title = first_present([
            localized(&attributes.title, "en"),
            attributes.title.values().next().and_then(|v| v.as_str()),
        ])
        .unwrap_or_else(|| UNTITLED.to_string());

        Self {
            id: MangaId::Text(manga.id.clone()),
            title,
            thumbnail,
            description: first_present([localized(&attributes.description, "en")])
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            source: MangaSource::MangaDex,
            latest_chapter: Some(attributes.latest_uploaded_chapter.clone()),
        }
    }

    pub fn from_jikan(manga: &jikan::Manga, placeholder: &str) -> Self {
        let jpg = &manga.images.jpg;

        Self {
            id: MangaId::Numeric(manga.mal_id),
            title: first_present([manga.title_english.as_deref(), manga.title.as_deref()])
                .unwrap_or_else(|| UNTITLED.to_string()),
            thumbnail: first_present([jpg.large_image_url.as_deref(), jpg.image_url.as_deref()])
                .unwrap_or_else(|| placeholder.to_string()),
            description: first_present([manga.synopsis.as_deref()])
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            source: MangaSource::Jikan,
            latest_chapter: None,
        }
    }

    pub fn from_anilist(media: &anilist::Media, placeholder: &str) -> Self {
        let title = &media.title;

        Self {
            id: MangaId::Numeric(media.id),
            title: first_present([
                title.english.as_deref(),
                title.romaji.as_deref(),
                title.native.as_deref(),
            ])
            .unwrap_or_else(|| UNTITLED.to_string()),
            thumbnail: first_present([media.cover_image.large.as_deref()])
                .unwrap_or_else(|| placeholder.to_string()),
            description: first_present([media.description.as_deref()])
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            source: MangaSource::AniList,
            latest_chapter: None,
        }
    }
}

impl MangaDetail {
    pub fn from_mangadex(manga: &mangadex::Manga, thumbnail: String) -> Self {
        let genres = manga
            .attributes
            .tags
            .iter()
            .filter_map(|tag| first_present([localized(&tag.attributes.name, "en")]))
            .collect();

        Self {
            summary: MangaSummary::from_mangadex(manga, thumbnail),
            genres,
        }
    }

    pub fn from_jikan(manga: &jikan::Manga, placeholder: &str) -> Self {
        Self {
            summary: MangaSummary::from_jikan(manga, placeholder),
            genres: manga.genres.iter().map(|g| g.name.clone()).collect(),
        }
    }

    pub fn from_anilist(media: &anilist::Media, placeholder: &str) -> Self {
        Self {
            summary: MangaSummary::from_anilist(media, placeholder),
            genres: media.genres.clone(),
        }
    }
}
