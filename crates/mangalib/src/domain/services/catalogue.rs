use futures::{StreamExt, stream};
use mangalib_upstream::{Listing, mangadex};
use serde::Serialize;
use thiserror::Error;

use crate::domain::{
    entities::manga::{MangaDetail, MangaSource, MangaSummary},
    repositories::{
        UpstreamError, anilist::AniListRepository, jikan::JikanRepository,
        mangadex::MangaDexRepository,
    },
};

const SNIPPET_LEN: usize = 200;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("every source failed")]
    AllSourcesFailed(Diagnostics),
    #[error("invalid manga id {0}")]
    InvalidId(String),
    #[error("manga not found")]
    NotFound,
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

impl CatalogueError {
    fn from_lookup(e: UpstreamError) -> Self {
        if e.is_not_found() {
            Self::NotFound
        } else {
            Self::Upstream(e)
        }
    }
}

/// What one source did while building a popular page.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SourceDiagnostics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl SourceDiagnostics {
    fn succeeded(status: u16, count: usize) -> Self {
        Self {
            status: Some(status),
            count,
            ..Default::default()
        }
    }

    fn failed(e: &UpstreamError) -> Self {
        let (error, snippet) = match e {
            UpstreamError::Status { status, body } => (
                format!("response not OK: {status}"),
                Some(body.chars().take(SNIPPET_LEN).collect()),
            ),
            e => (e.to_string(), None),
        };

        Self {
            status: e.status(),
            count: 0,
            error: Some(error),
            snippet,
        }
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    pub manga_dex: SourceDiagnostics,
    pub jikan: SourceDiagnostics,
    pub ani_list: SourceDiagnostics,
}

impl Diagnostics {
    pub fn all_failed(&self) -> bool {
        self.manga_dex.is_failure() && self.jikan.is_failure() && self.ani_list.is_failure()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularPage {
    pub data: Vec<MangaSummary>,
    pub page: usize,
    pub total: usize,
    pub per_page: usize,
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone)]
pub struct CatalogueOptions {
    /// Records requested from each source.
    pub page_size: usize,
    /// Cover lookups allowed in flight at once.
    pub cover_concurrency: usize,
    pub placeholder: String,
}

impl Default for CatalogueOptions {
    fn default() -> Self {
        Self {
            page_size: 300,
            cover_concurrency: 32,
            placeholder: "/1.png".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct CatalogueService<D, J, A>
where
    D: MangaDexRepository,
    J: JikanRepository,
    A: AniListRepository,
{
    mangadex: D,
    jikan: J,
    anilist: A,
    options: CatalogueOptions,
}

impl<D, J, A> CatalogueService<D, J, A>
where
    D: MangaDexRepository,
    J: JikanRepository,
    A: AniListRepository,
{
    pub fn new(mangadex: D, jikan: J, anilist: A, options: CatalogueOptions) -> Self {
        Self {
            mangadex,
            jikan,
            anilist,
            options,
        }
    }

    /// Popular manga from every source, MangaDex first, then Jikan, then AniList.
    ///
    /// Sources are queried one after another and fail independently; a failed
    /// source contributes nothing and is reported in the diagnostics. Only
    /// MangaDex is paged, the other two always return their top window.
    pub async fn fetch_popular(&self, page: usize) -> Result<PopularPage, CatalogueError> {
        let page = page.max(1);
        let mut data = vec![];
        let mut diagnostics = Diagnostics::default();

        diagnostics.manga_dex = collect(
            MangaSource::MangaDex,
            self.popular_from_mangadex(page).await,
            &mut data,
        );
        diagnostics.jikan = collect(
            MangaSource::Jikan,
            self.popular_from_jikan().await,
            &mut data,
        );
        diagnostics.ani_list = collect(
            MangaSource::AniList,
            self.popular_from_anilist().await,
            &mut data,
        );

        if diagnostics.all_failed() {
            error!("popular page {page}: every source failed");
            return Err(CatalogueError::AllSourcesFailed(diagnostics));
        }

        Ok(PopularPage {
            total: data.len(),
            data,
            page,
            per_page: self.options.page_size,
            diagnostics,
        })
    }

    pub async fn fetch_detail(
        &self,
        source: MangaSource,
        id: &str,
    ) -> Result<MangaDetail, CatalogueError> {
        let placeholder = &self.options.placeholder;

        match source {
            MangaSource::MangaDex => {
                let manga = self
                    .mangadex
                    .get_manga(id)
                    .await
                    .map_err(CatalogueError::from_lookup)?;
                let thumbnail = self.resolve_cover(&manga).await;

                Ok(MangaDetail::from_mangadex(&manga, thumbnail))
            }
            MangaSource::Jikan => {
                let manga = self
                    .jikan
                    .get_manga(parse_numeric_id(id)?)
                    .await
                    .map_err(CatalogueError::from_lookup)?;

                Ok(MangaDetail::from_jikan(&manga, placeholder))
            }
            MangaSource::AniList => {
                let media = self
                    .anilist
                    .get_media(parse_numeric_id(id)?)
                    .await
                    .map_err(CatalogueError::from_lookup)?
                    .ok_or(CatalogueError::NotFound)?;

                Ok(MangaDetail::from_anilist(&media, placeholder))
            }
        }
    }

    /// CDN thumbnail for a MangaDex manga, or the placeholder when it cannot be resolved.
    pub async fn resolve_cover(&self, manga: &mangadex::Manga) -> String {
        let placeholder = || self.options.placeholder.clone();

        let Some(cover_art) = manga.cover_art() else {
            return placeholder();
        };
        if manga.id.is_empty() || cover_art.id.is_empty() {
            return placeholder();
        }

        let expanded = cover_art
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.file_name.clone());
        let file_name = match expanded {
            Some(file_name) => Some(file_name),
            None => match self.mangadex.get_cover_file_name(&cover_art.id).await {
                Ok(file_name) => file_name,
                Err(e) => {
                    debug!("cover {} for manga {}: {e}", cover_art.id, manga.id);
                    None
                }
            },
        };

        match file_name {
            Some(file_name) if !file_name.is_empty() => {
                self.mangadex.cover_url(&manga.id, &file_name)
            }
            _ => placeholder(),
        }
    }

    async fn popular_from_mangadex(
        &self,
        page: usize,
    ) -> Result<Listing<MangaSummary>, UpstreamError> {
        let limit = self.options.page_size;
        let offset = (page - 1)
            .checked_mul(limit)
            .ok_or_else(|| UpstreamError::Api(format!("page {page} is out of range")))?;
        let listing = self.mangadex.list_latest_manga(limit, offset).await?;

        let items = stream::iter(listing.items)
            .map(|manga| async move {
                let thumbnail = self.resolve_cover(&manga).await;
                MangaSummary::from_mangadex(&manga, thumbnail)
            })
            .buffered(self.options.cover_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        Ok(Listing {
            status: listing.status,
            items,
        })
    }

    async fn popular_from_jikan(&self) -> Result<Listing<MangaSummary>, UpstreamError> {
        let listing = self.jikan.list_manga(self.options.page_size).await?;

        Ok(Listing {
            status: listing.status,
            items: listing
                .items
                .iter()
                .map(|manga| MangaSummary::from_jikan(manga, &self.options.placeholder))
                .collect(),
        })
    }

    async fn popular_from_anilist(&self) -> Result<Listing<MangaSummary>, UpstreamError> {
        let listing = self.anilist.popular_manga(self.options.page_size).await?;

        Ok(Listing {
            status: listing.status,
            items: listing
                .items
                .iter()
                .map(|media| MangaSummary::from_anilist(media, &self.options.placeholder))
                .collect(),
        })
    }
}

fn collect(
    source: MangaSource,
    result: Result<Listing<MangaSummary>, UpstreamError>,
    data: &mut Vec<MangaSummary>,
) -> SourceDiagnostics {
    match result {
        Ok(listing) => {
            debug!("{source}: {} records", listing.items.len());
            let diagnostics = SourceDiagnostics::succeeded(listing.status, listing.items.len());
            data.extend(listing.items);
            diagnostics
        }
        Err(e) => {
            warn!("{source} failed: {e}");
            SourceDiagnostics::failed(&e)
        }
    }
}

fn parse_numeric_id(id: &str) -> Result<i64, CatalogueError> {
    id.parse()
        .map_err(|_| CatalogueError::InvalidId(id.to_string()))
}
