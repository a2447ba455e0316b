use axum::{
    Json,
    extract::{Extension, Path, Query},
};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::{
    domain::entities::chapter::{Chapter, ChapterImageSet},
    presentation::Chapters,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MangaImagesParams {
    manga_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChaptersParams {
    lang: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChapterList {
    data: Vec<Chapter>,
}

pub async fn manga_images(
    Query(params): Query<MangaImagesParams>,
    Extension(svc): Extension<Chapters>,
) -> Result<Json<ChapterImageSet>, ApiError> {
    let images = svc.first_chapter_images(params.manga_id.as_deref()).await?;

    Ok(Json(images))
}

pub async fn chapter_images(
    Path(chapter_id): Path<String>,
    Extension(svc): Extension<Chapters>,
) -> Result<Json<ChapterImageSet>, ApiError> {
    Ok(Json(svc.chapter_images(&chapter_id).await?))
}

pub async fn manga_chapters(
    Path(manga_id): Path<String>,
    Query(params): Query<ChaptersParams>,
    Extension(svc): Extension<Chapters>,
) -> Result<Json<ChapterList>, ApiError> {
    let lang = params.lang.as_deref().filter(|lang| !lang.is_empty());
    let data = svc.chapters(&manga_id, lang).await?;

    Ok(Json(ChapterList { data }))
}
