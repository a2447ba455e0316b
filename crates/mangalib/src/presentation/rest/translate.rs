use axum::{Json, body::Bytes, extract::Extension};
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::presentation::Translate;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslateRequest {
    text: Option<String>,
    target_lang: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    translated_text: String,
}

/// An unreadable body counts as missing fields, reported after the key check.
pub async fn translate(
    Extension(svc): Extension<Translate>,
    body: Bytes,
) -> Result<Json<TranslateResponse>, ApiError> {
    let req: TranslateRequest = serde_json::from_slice(&body).unwrap_or_default();

    let translated_text = svc
        .translate(req.text.as_deref(), req.target_lang.as_deref())
        .await?;

    Ok(Json(TranslateResponse { translated_text }))
}
