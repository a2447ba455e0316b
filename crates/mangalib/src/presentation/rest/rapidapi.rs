use axum::{
    Json,
    extract::{Extension, Query},
};
use mangalib_upstream::mangaverse::FetchQuery;
use serde::Deserialize;
use serde_json::{Value, json};

use super::ApiError;
use crate::presentation::RapidApi;

#[derive(Debug, Deserialize)]
pub struct MangaverseParams {
    page: Option<String>,
    genres: Option<String>,
    nsfw: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl From<MangaverseParams> for FetchQuery {
    fn from(params: MangaverseParams) -> Self {
        let defaults = FetchQuery::default();

        FetchQuery {
            page: params.page.unwrap_or(defaults.page),
            genres: params.genres.unwrap_or(defaults.genres),
            nsfw: params.nsfw.unwrap_or(defaults.nsfw),
            kind: params.kind.unwrap_or(defaults.kind),
        }
    }
}

pub async fn mangaverse(
    Query(params): Query<MangaverseParams>,
    Extension(svc): Extension<RapidApi>,
) -> Result<Json<Value>, ApiError> {
    let data = svc.mangaverse(&params.into()).await?;

    Ok(Json(json!({ "data": data })))
}

pub async fn genres(Extension(svc): Extension<RapidApi>) -> Result<Json<Value>, ApiError> {
    Ok(Json(svc.genres().await?))
}
