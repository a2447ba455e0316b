use thiserror::Error;

use crate::domain::repositories::{UpstreamError, translation::TranslationRepository};

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Google Translate API key is not configured on the server.")]
    MissingApiKey,
    #[error("Missing text or target language.")]
    MissingInput,
    #[error("Google API error: {0}")]
    Api(String),
    #[error("Failed to fetch translation.")]
    Failed,
}

impl From<UpstreamError> for TranslateError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::Api(message) => Self::Api(message),
            UpstreamError::MissingKey(_) => Self::MissingApiKey,
            e => {
                error!("translation failed: {e}");
                Self::Failed
            }
        }
    }
}

#[derive(Clone)]
pub struct TranslateService<R>
where
    R: TranslationRepository,
{
    repo: R,
}

impl<R> TranslateService<R>
where
    R: TranslationRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// The key is checked before the input, and neither failure reaches the upstream.
    pub async fn translate(
        &self,
        text: Option<&str>,
        target_lang: Option<&str>,
    ) -> Result<String, TranslateError> {
        if !self.repo.is_configured() {
            return Err(TranslateError::MissingApiKey);
        }

        let (text, target_lang) = match (text, target_lang) {
            (Some(text), Some(target)) if !text.is_empty() && !target.is_empty() => (text, target),
            _ => return Err(TranslateError::MissingInput),
        };

        self.repo
            .translate(text, target_lang)
            .await?
            .ok_or(TranslateError::Failed)
    }
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    #[derive(Default)]
    struct FakeTranslation {
        configured: bool,
        reply: Option<&'static str>,
        api_error: Option<&'static str>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TranslationRepository for FakeTranslation {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn translate(&self, text: &str, target: &str) -> Result<Option<String>, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(message) = self.api_error {
                return Err(UpstreamError::Api(message.to_string()));
            }
            Ok(self.reply.map(|reply| format!("{reply}:{target}:{text}")))
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_checked_first() {
        let svc = TranslateService::new(FakeTranslation::default());

        let res = svc.translate(None, None).await;

        assert!(matches!(res, Err(TranslateError::MissingApiKey)));
        assert_eq!(svc.repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_input() {
        let svc = TranslateService::new(FakeTranslation {
            configured: true,
            ..Default::default()
        });

        for (text, target) in [(None, Some("ja")), (Some("hi"), None), (Some(""), Some("ja"))] {
            assert!(matches!(
                svc.translate(text, target).await,
                Err(TranslateError::MissingInput)
            ));
        }
        assert_eq!(svc.repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_translate() {
        let svc = TranslateService::new(FakeTranslation {
            configured: true,
            reply: Some("ok"),
            ..Default::default()
        });

        let text = svc.translate(Some("hello"), Some("ja")).await.unwrap();

        assert_eq!(text, "ok:ja:hello");
    }

    #[tokio::test]
    async fn test_upstream_errors() {
        let svc = TranslateService::new(FakeTranslation {
            configured: true,
            api_error: Some("Invalid target"),
            ..Default::default()
        });
        let err = svc.translate(Some("hello"), Some("xx")).await.unwrap_err();
        assert_eq!(err.to_string(), "Google API error: Invalid target");

        let svc = TranslateService::new(FakeTranslation {
            configured: true,
            ..Default::default()
        });
        let err = svc.translate(Some("hello"), Some("ja")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch translation.");
    }
}
