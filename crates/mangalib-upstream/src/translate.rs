use serde::Deserialize;
use serde_json::json;

use crate::{Error, Result, trim_base_url};

pub const NAME: &str = "google translate";
pub const API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct Translations {
    translations: Vec<Translation>,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct ApiError {
    message: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
struct TranslateResponse {
    data: Option<Translations>,
    error: Option<ApiError>,
}

/// Google Cloud Translation v2.
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl GoogleTranslate {
    pub fn new(client: reqwest::Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: trim_base_url(api_url),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Error payloads come back as [`Error::Api`] with the upstream message.
    /// `None` when the upstream answered without any translation.
    pub async fn translate(&self, text: &str, target: &str) -> Result<Option<String>> {
        let key = self.api_key.as_ref().ok_or(Error::MissingKey(NAME))?;

        let res = self
            .client
            .post(&self.api_url)
            .query(&[("key", key)])
            .json(&json!({
                "q": text,
                "target": target,
            }))
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        let res: TranslateResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!("{NAME}: undecodable response with status {status}");
            Error::Decode(e)
        })?;

        if let Some(error) = res.error {
            error!("{NAME} error: {}", error.message);
            return Err(Error::Api(error.message));
        }

        Ok(res
            .data
            .and_then(|data| data.translations.into_iter().next())
            .map(|t| t.translated_text))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_payload_decodes() {
        let res: TranslateResponse =
            serde_json::from_str(r#"{"error":{"code":400,"message":"Invalid target"}}"#).unwrap();

        assert!(res.data.is_none());
        assert_eq!(res.error.unwrap().message, "Invalid target");
    }

    #[tokio::test]
    async fn test_translate_without_key() {
        let translate = GoogleTranslate::new(reqwest::Client::new(), API_URL, None);

        let res = translate.translate("hello", "ja").await;

        assert!(matches!(res, Err(Error::MissingKey(_))));
    }
}
