use mangalib_upstream::mangaverse::FetchQuery;
use serde_json::Value;
use thiserror::Error;

use crate::domain::repositories::{UpstreamError, rapidapi::RapidApiRepository};

#[derive(Debug, Error)]
pub enum RapidApiError {
    #[error("RapidAPI key is not configured")]
    MissingApiKey,
    /// The upstream answered with a non-2xx status, passed through to the caller.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Upstream(UpstreamError),
}

impl From<UpstreamError> for RapidApiError {
    fn from(e: UpstreamError) -> Self {
        match e {
            UpstreamError::MissingKey(_) => Self::MissingApiKey,
            e => Self::Upstream(e),
        }
    }
}

/// Thin proxies for the RapidAPI hosted services.
#[derive(Clone)]
pub struct RapidApiService<R>
where
    R: RapidApiRepository,
{
    repo: R,
}

impl<R> RapidApiService<R>
where
    R: RapidApiRepository,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn mangaverse(&self, query: &FetchQuery) -> Result<Value, RapidApiError> {
        self.ensure_configured()?;

        self.repo.fetch_mangaverse(query).await.map_err(|e| match e {
            UpstreamError::Status { status, body } => RapidApiError::Status {
                status,
                message: format!("Mangaverse API responded with status {status}: {body}"),
            },
            e => e.into(),
        })
    }

    pub async fn genres(&self) -> Result<Value, RapidApiError> {
        self.ensure_configured()?;

        self.repo.manga_genres().await.map_err(|e| match e {
            UpstreamError::Status { status, .. } => RapidApiError::Status {
                status,
                message: "Failed to fetch genres".to_string(),
            },
            e => e.into(),
        })
    }

    pub async fn animedb_manga_raw(&self) -> Result<String, RapidApiError> {
        self.ensure_configured()?;

        Ok(self.repo.animedb_manga_raw().await?)
    }

    fn ensure_configured(&self) -> Result<(), RapidApiError> {
        if self.repo.is_configured() {
            Ok(())
        } else {
            Err(RapidApiError::MissingApiKey)
        }
    }
}

#[cfg(test)]
mod test {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;

    #[derive(Default)]
    struct FakeRapidApi {
        configured: bool,
        status: Option<u16>,
        calls: AtomicUsize,
        queries: Mutex<Vec<FetchQuery>>,
    }

    impl FakeRapidApi {
        fn respond<T>(&self, ok: T) -> Result<T, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                Some(status) => Err(UpstreamError::Status {
                    status,
                    body: "quota exceeded".to_string(),
                }),
                None => Ok(ok),
            }
        }
    }

    #[async_trait]
    impl RapidApiRepository for FakeRapidApi {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn fetch_mangaverse(&self, query: &FetchQuery) -> Result<Value, UpstreamError> {
            self.queries.lock().unwrap().push(query.clone());
            self.respond(json!([{ "title": "Solo Leveling" }]))
        }

        async fn manga_genres(&self) -> Result<Value, UpstreamError> {
            self.respond(json!([{ "name": "Action" }]))
        }

        async fn animedb_manga_raw(&self) -> Result<String, UpstreamError> {
            self.respond("raw".to_string())
        }
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_call() {
        let svc = RapidApiService::new(FakeRapidApi::default());

        assert!(matches!(
            svc.mangaverse(&FetchQuery::default()).await,
            Err(RapidApiError::MissingApiKey)
        ));
        assert!(matches!(svc.genres().await, Err(RapidApiError::MissingApiKey)));
        assert!(matches!(
            svc.animedb_manga_raw().await,
            Err(RapidApiError::MissingApiKey)
        ));
        assert_eq!(svc.repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mangaverse_passes_query_through() {
        let svc = RapidApiService::new(FakeRapidApi {
            configured: true,
            ..Default::default()
        });

        let data = svc.mangaverse(&FetchQuery::default()).await.unwrap();

        assert_eq!(data, json!([{ "title": "Solo Leveling" }]));
        assert_eq!(svc.repo.queries.lock().unwrap()[0], FetchQuery::default());
    }

    #[tokio::test]
    async fn test_status_is_passed_through() {
        let svc = RapidApiService::new(FakeRapidApi {
            configured: true,
            status: Some(429),
            ..Default::default()
        });

        match svc.mangaverse(&FetchQuery::default()).await {
            Err(RapidApiError::Status { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(
                    message,
                    "Mangaverse API responded with status 429: quota exceeded"
                );
            }
            res => panic!("unexpected {res:?}"),
        }

        match svc.genres().await {
            Err(RapidApiError::Status { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "Failed to fetch genres");
            }
            res => panic!("unexpected {res:?}"),
        }
    }
}
