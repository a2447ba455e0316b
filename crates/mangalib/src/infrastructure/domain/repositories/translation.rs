use async_trait::async_trait;
use mangalib_upstream::GoogleTranslate;

use crate::{
    domain::repositories::{UpstreamError, translation::TranslationRepository},
    infrastructure::config::Config,
};

#[derive(Clone)]
pub struct TranslationRepositoryImpl {
    client: GoogleTranslate,
}

impl TranslationRepositoryImpl {
    pub fn new(client: GoogleTranslate) -> Self {
        Self { client }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> Self {
        Self::new(GoogleTranslate::new(
            client,
            &config.upstream.translate_api,
            config.google_translate_api_key.clone(),
        ))
    }
}

#[async_trait]
impl TranslationRepository for TranslationRepositoryImpl {
    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, UpstreamError> {
        self.client.translate(text, target).await
    }
}
