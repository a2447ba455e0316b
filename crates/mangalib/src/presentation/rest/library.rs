use axum::{
    Json,
    extract::{Extension, Path},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{Map, Value};

use super::ApiError;
use crate::{
    domain::entities::library::{FavoriteEntry, ReadingProgress},
    presentation::Library,
};

#[derive(Debug, Serialize)]
pub struct Data<T> {
    data: T,
}

pub async fn list_favorites(
    Extension(svc): Extension<Library>,
) -> Result<Json<Data<Vec<FavoriteEntry>>>, ApiError> {
    let data = svc.list_favorites().await?;

    Ok(Json(Data { data }))
}

pub async fn add_favorite(
    Extension(svc): Extension<Library>,
    Json(entry): Json<FavoriteEntry>,
) -> Result<(StatusCode, Json<FavoriteEntry>), ApiError> {
    let status = if svc.add_favorite(entry.clone()).await? {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(entry)))
}

pub async fn get_favorite(
    Path(id): Path<String>,
    Extension(svc): Extension<Library>,
) -> Result<Json<FavoriteEntry>, ApiError> {
    svc.get_favorite(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("{id} is not a favorite")))
}

pub async fn remove_favorite(
    Path(id): Path<String>,
    Extension(svc): Extension<Library>,
) -> Result<StatusCode, ApiError> {
    if svc.remove_favorite(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("{id} is not a favorite")))
    }
}

pub async fn clear_favorites(Extension(svc): Extension<Library>) -> Result<StatusCode, ApiError> {
    svc.clear_favorites().await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_progress(
    Extension(svc): Extension<Library>,
) -> Result<Json<Data<Map<String, Value>>>, ApiError> {
    let data = svc
        .list_progress()
        .await?
        .into_iter()
        .map(|(id, progress)| Ok((id, serde_json::to_value(progress)?)))
        .collect::<Result<Map<String, Value>, serde_json::Error>>()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(Data { data }))
}

pub async fn get_progress(
    Path(id): Path<String>,
    Extension(svc): Extension<Library>,
) -> Result<Json<ReadingProgress>, ApiError> {
    svc.get_progress(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no progress for {id}")))
}

pub async fn set_progress(
    Path(id): Path<String>,
    Extension(svc): Extension<Library>,
    Json(progress): Json<ReadingProgress>,
) -> Result<Json<ReadingProgress>, ApiError> {
    svc.set_progress(&id, &progress).await?;

    Ok(Json(progress))
}
