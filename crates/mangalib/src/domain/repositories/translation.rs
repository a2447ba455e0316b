use async_trait::async_trait;

use super::UpstreamError;

#[async_trait]
pub trait TranslationRepository: Send + Sync {
    fn is_configured(&self) -> bool;

    async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, UpstreamError>;
}
