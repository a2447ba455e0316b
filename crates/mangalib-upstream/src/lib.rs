#[macro_use]
extern crate log;

pub mod anilist;
pub use anilist::AniList;

pub mod animedb;
pub use animedb::AnimeDb;

pub mod jikan;
pub use jikan::Jikan;

pub mod mangadex;
pub use mangadex::MangaDex;

pub mod mangaverse;
pub use mangaverse::Mangaverse;

pub mod myanimelist;
pub use myanimelist::MyAnimeList;

pub mod translate;
pub use translate::GoogleTranslate;

mod rapidapi;

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Api(String),
    #[error("{0} api key is not configured")]
    MissingKey(&'static str),
}

impl Error {
    /// Upstream HTTP status, when the failure carried one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// One page of records from a list endpoint, with the status it was served with.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub status: u16,
    pub items: Vec<T>,
}

/// Reads a response body as JSON, turning non-2xx statuses into [`Error::Status`].
pub(crate) async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> Result<(u16, T)> {
    let status = res.status();
    let url = res.url().clone();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        warn!("{url} responded with {status}");
        return Err(Error::Status {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = res.bytes().await?;
    trace!("{url} => {} bytes", bytes.len());

    Ok((status.as_u16(), serde_json::from_slice(&bytes)?))
}

/// Decodes a field, falling back to its default when it is null or of an unexpected shape.
///
/// Keeps one malformed record from failing a whole listing.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub(crate) fn trim_base_url(base_url: impl Into<String>) -> String {
    let base_url = base_url.into();
    base_url.trim_end_matches('/').to_string()
}
