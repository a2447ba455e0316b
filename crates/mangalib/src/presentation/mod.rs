pub mod rest;

use std::net::SocketAddr;

use anyhow::anyhow;
use axum::{
    Router,
    extract::Extension,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use self::rest::{catalogue, chapter, health::health_check, library, rapidapi, translate};
use crate::{
    domain::services::{
        catalogue::{CatalogueOptions, CatalogueService},
        chapter::ChapterService,
        library::LibraryService,
        rapidapi::RapidApiService,
        translate::TranslateService,
    },
    infrastructure::{
        config::Config,
        domain::repositories::{
            anilist::AniListRepositoryImpl, jikan::JikanRepositoryImpl,
            mangadex::MangaDexRepositoryImpl, rapidapi::RapidApiRepositoryImpl,
            translation::TranslationRepositoryImpl,
        },
        http,
        library::LibraryStoreImpl,
    },
};

pub type Catalogue =
    CatalogueService<MangaDexRepositoryImpl, JikanRepositoryImpl, AniListRepositoryImpl>;
pub type Chapters = ChapterService<MangaDexRepositoryImpl>;
pub type Translate = TranslateService<TranslationRepositoryImpl>;
pub type RapidApi = RapidApiService<RapidApiRepositoryImpl>;
pub type Library = LibraryService<LibraryStoreImpl>;

#[derive(Default)]
pub struct ServerBuilder {
    catalogue_svc: Option<Catalogue>,
    chapter_svc: Option<Chapters>,
    translate_svc: Option<Translate>,
    rapidapi_svc: Option<RapidApi>,
    library_svc: Option<Library>,
    enable_cors: bool,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wires every service against the upstreams and library backend named in `config`.
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let client = http::build_client(config)?;
        let mangadex = MangaDexRepositoryImpl::from_config(client.clone(), config);
        let options = CatalogueOptions {
            page_size: config.popular.page_size,
            cover_concurrency: config.popular.cover_concurrency,
            placeholder: config.placeholder_thumbnail.clone(),
        };

        let mut builder = Self::new()
            .with_catalogue_svc(CatalogueService::new(
                mangadex.clone(),
                JikanRepositoryImpl::from_config(client.clone(), config),
                AniListRepositoryImpl::from_config(client.clone(), config),
                options,
            ))
            .with_chapter_svc(ChapterService::new(mangadex))
            .with_translate_svc(TranslateService::new(
                TranslationRepositoryImpl::from_config(client.clone(), config),
            ))
            .with_rapidapi_svc(RapidApiService::new(RapidApiRepositoryImpl::from_config(
                client, config,
            )))
            .with_library_svc(LibraryService::new(LibraryStoreImpl::from_config(
                &config.library,
            )?));

        if config.enable_cors {
            builder = builder.enable_cors();
        }

        Ok(builder)
    }

    pub fn with_catalogue_svc(self, catalogue_svc: Catalogue) -> Self {
        Self {
            catalogue_svc: Some(catalogue_svc),
            ..self
        }
    }

    pub fn with_chapter_svc(self, chapter_svc: Chapters) -> Self {
        Self {
            chapter_svc: Some(chapter_svc),
            ..self
        }
    }

    pub fn with_translate_svc(self, translate_svc: Translate) -> Self {
        Self {
            translate_svc: Some(translate_svc),
            ..self
        }
    }

    pub fn with_rapidapi_svc(self, rapidapi_svc: RapidApi) -> Self {
        Self {
            rapidapi_svc: Some(rapidapi_svc),
            ..self
        }
    }

    pub fn with_library_svc(self, library_svc: Library) -> Self {
        Self {
            library_svc: Some(library_svc),
            ..self
        }
    }

    pub fn enable_cors(self) -> Self {
        Self {
            enable_cors: true,
            ..self
        }
    }

    pub fn build(self) -> Result<Server, anyhow::Error> {
        let catalogue_svc = self
            .catalogue_svc
            .ok_or_else(|| anyhow!("no catalogue service"))?;
        let chapter_svc = self
            .chapter_svc
            .ok_or_else(|| anyhow!("no chapter service"))?;
        let translate_svc = self
            .translate_svc
            .ok_or_else(|| anyhow!("no translate service"))?;
        let rapidapi_svc = self
            .rapidapi_svc
            .ok_or_else(|| anyhow!("no rapidapi service"))?;
        let library_svc = self
            .library_svc
            .ok_or_else(|| anyhow!("no library service"))?;

        Ok(Server::new(
            self.enable_cors,
            catalogue_svc,
            chapter_svc,
            translate_svc,
            rapidapi_svc,
            library_svc,
        ))
    }
}

pub struct Server {
    router: Router,
}

impl Server {
    pub fn new(
        enable_cors: bool,
        catalogue_svc: Catalogue,
        chapter_svc: Chapters,
        translate_svc: Translate,
        rapidapi_svc: RapidApi,
        library_svc: Library,
    ) -> Self {
        let mut router = Router::new()
            .route("/health", get(health_check))
            .route("/api/popular", get(catalogue::popular))
            // detail and chapter list share the first segment name
            .route("/api/manga/{source}/{id}", get(catalogue::manga_detail))
            // here `{source}` carries a MangaDex manga id
            .route("/api/manga/{source}/chapters", get(chapter::manga_chapters))
            .route("/api/mangaImages", get(chapter::manga_images))
            .route("/api/chapters/{id}/images", get(chapter::chapter_images))
            .route("/api/translate", post(translate::translate))
            .route("/api/mangaverse", get(rapidapi::mangaverse))
            .route("/api/genres", get(rapidapi::genres))
            .route(
                "/api/library/favorites",
                get(library::list_favorites)
                    .post(library::add_favorite)
                    .delete(library::clear_favorites),
            )
            .route(
                "/api/library/favorites/{id}",
                get(library::get_favorite).delete(library::remove_favorite),
            )
            .route("/api/library/progress", get(library::list_progress))
            .route(
                "/api/library/progress/{id}",
                get(library::get_progress).put(library::set_progress),
            )
            .layer(Extension(catalogue_svc))
            .layer(Extension(chapter_svc))
            .layer(Extension(translate_svc))
            .layer(Extension(rapidapi_svc))
            .layer(Extension(library_svc));

        if enable_cors {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        Self { router }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn serve<A: Into<SocketAddr>>(self, addr: A) -> Result<(), anyhow::Error> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("listening on {addr}");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
