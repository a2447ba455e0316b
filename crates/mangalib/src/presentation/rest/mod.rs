pub mod catalogue;
pub mod chapter;
pub mod health;
pub mod library;
pub mod rapidapi;
pub mod translate;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::services::{
    catalogue::CatalogueError, chapter::ChapterError, library::LibraryError,
    rapidapi::RapidApiError, translate::TranslateError,
};

/// Every failure leaves the API as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Status(u16, String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Status(status, message) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            ),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<CatalogueError> for ApiError {
    fn from(e: CatalogueError) -> Self {
        match e {
            CatalogueError::InvalidId(_) => ApiError::BadRequest(e.to_string()),
            CatalogueError::NotFound => ApiError::NotFound(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ChapterError> for ApiError {
    fn from(e: ChapterError) -> Self {
        match e {
            ChapterError::MissingMangaId => ApiError::BadRequest(e.to_string()),
            ChapterError::NoChapters => ApiError::NotFound(e.to_string()),
            ChapterError::Upstream(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<TranslateError> for ApiError {
    fn from(e: TranslateError) -> Self {
        match e {
            TranslateError::MissingInput => ApiError::BadRequest(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<RapidApiError> for ApiError {
    fn from(e: RapidApiError) -> Self {
        match e {
            RapidApiError::Status { status, message } => ApiError::Status(status, message),
            e => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<LibraryError> for ApiError {
    fn from(e: LibraryError) -> Self {
        error!("library: {e}");
        ApiError::Internal(e.to_string())
    }
}
