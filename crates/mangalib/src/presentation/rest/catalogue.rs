use axum::{
    Json,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use super::ApiError;
use crate::{
    domain::{
        entities::manga::{MangaDetail, MangaSource},
        services::catalogue::CatalogueError,
    },
    presentation::Catalogue,
};

#[derive(Debug, Deserialize)]
pub struct PopularParams {
    page: Option<String>,
}

impl PopularParams {
    /// Anything but a positive integer means the first page.
    fn page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|page| page.trim().parse::<i64>().ok())
            .filter(|page| *page > 0)
            .map(|page| page as usize)
            .unwrap_or(1)
    }
}

pub async fn popular(
    Query(params): Query<PopularParams>,
    Extension(svc): Extension<Catalogue>,
) -> Response {
    match svc.fetch_popular(params.page()).await {
        Ok(page) => Json(page).into_response(),
        Err(CatalogueError::AllSourcesFailed(diagnostics)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "every source failed",
                "diagnostics": diagnostics,
            })),
        )
            .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

pub async fn manga_detail(
    Path((source, id)): Path<(String, String)>,
    Extension(svc): Extension<Catalogue>,
) -> Result<Json<MangaDetail>, ApiError> {
    let source: MangaSource = source.parse().map_err(ApiError::BadRequest)?;

    Ok(Json(svc.fetch_detail(source, &id).await?))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_page_param() {
        let page = |page: Option<&str>| {
            PopularParams {
                page: page.map(str::to_string),
            }
            .page()
        };

        assert_eq!(page(None), 1);
        assert_eq!(page(Some("3")), 3);
        assert_eq!(page(Some("0")), 1);
        assert_eq!(page(Some("-2")), 1);
        assert_eq!(page(Some("abc")), 1);
    }
}
