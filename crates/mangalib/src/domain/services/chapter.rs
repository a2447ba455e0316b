use std::collections::HashSet;

use mangalib_upstream::mangadex::ChapterQuery;
use thiserror::Error;

use crate::domain::{
    entities::chapter::{Chapter, ChapterImageSet},
    repositories::{UpstreamError, mangadex::MangaDexRepository},
};

const READER_CHAPTER_LIMIT: usize = 100;

#[derive(Debug, Error)]
pub enum ChapterError {
    #[error("Missing mangaId")]
    MissingMangaId,
    #[error("No chapters found")]
    NoChapters,
    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// Resolves MangaDex chapters into page image URLs.
#[derive(Clone)]
pub struct ChapterService<R>
where
    R: MangaDexRepository,
{
    repo: R,
}

impl<R> ChapterService<R>
where
    R: MangaDexRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Pages of the earliest English chapter of a manga.
    pub async fn first_chapter_images(
        &self,
        manga_id: Option<&str>,
    ) -> Result<ChapterImageSet, ChapterError> {
        let manga_id = manga_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(ChapterError::MissingMangaId)?;

        let query = ChapterQuery::new(manga_id, 1).language("en");
        let chapter = self
            .repo
            .list_chapters(&query)
            .await?
            .into_iter()
            .next()
            .ok_or(ChapterError::NoChapters)?;
        debug!("manga {manga_id}: first english chapter is {}", chapter.id);

        self.chapter_images(&chapter.id).await
    }

    pub async fn chapter_images(&self, chapter_id: &str) -> Result<ChapterImageSet, ChapterError> {
        let server = self.repo.get_at_home_server(chapter_id).await?;

        Ok(ChapterImageSet::from(&server))
    }

    /// Chapters in reading order, one per chapter number.
    ///
    /// Chapters without a number are dropped; when several uploads share a
    /// number the first one wins.
    pub async fn chapters(
        &self,
        manga_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<Chapter>, ChapterError> {
        let mut query = ChapterQuery::new(manga_id, READER_CHAPTER_LIMIT);
        if let Some(language) = language {
            query = query.language(language);
        }

        let mut seen = HashSet::new();
        let chapters = self
            .repo
            .list_chapters(&query)
            .await?
            .into_iter()
            .map(Chapter::from)
            .filter(|ch| language.is_none() || ch.translated_language.as_deref() == language)
            .filter(|ch| match ch.chapter.as_ref() {
                Some(number) if !number.is_empty() => seen.insert(number.clone()),
                _ => false,
            })
            .collect();

        Ok(chapters)
    }
}
