use mangalib::{
    domain::services::{
        catalogue::{CatalogueOptions, CatalogueService},
        chapter::ChapterService,
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
    },
};
use serde::Serialize;

pub struct Services {
    catalogue: CatalogueService<MangaDexRepositoryImpl, JikanRepositoryImpl, AniListRepositoryImpl>,
    chapter: ChapterService<MangaDexRepositoryImpl>,
    translate: TranslateService<TranslationRepositoryImpl>,
    rapidapi: RapidApiService<RapidApiRepositoryImpl>,
}

fn print<T: Serialize>(value: &T) -> Result<(), anyhow::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

impl Services {
    pub fn from_config(config: &Config) -> Result<Self, anyhow::Error> {
        let client = http::build_client(config)?;
        let mangadex = MangaDexRepositoryImpl::from_config(client.clone(), config);

        Ok(Self {
            catalogue: CatalogueService::new(
                mangadex.clone(),
                JikanRepositoryImpl::from_config(client.clone(), config),
                AniListRepositoryImpl::from_config(client.clone(), config),
                CatalogueOptions {
                    page_size: config.popular.page_size,
                    cover_concurrency: config.popular.cover_concurrency,
                    placeholder: config.placeholder_thumbnail.clone(),
                },
            ),
            chapter: ChapterService::new(mangadex),
            translate: TranslateService::new(TranslationRepositoryImpl::from_config(
                client.clone(),
                config,
            )),
            rapidapi: RapidApiService::new(RapidApiRepositoryImpl::from_config(client, config)),
        })
    }

    pub async fn popular(&self, page: usize) -> Result<(), anyhow::Error> {
        let popular = self.catalogue.fetch_popular(page).await?;
        info!(
            "page {}: {} records (mangadex {}, jikan {}, anilist {})",
            popular.page,
            popular.total,
            popular.diagnostics.manga_dex.count,
            popular.diagnostics.jikan.count,
            popular.diagnostics.ani_list.count
        );

        print(&popular)
    }

    pub async fn images(&self, manga_id: &str) -> Result<(), anyhow::Error> {
        let images = self.chapter.first_chapter_images(Some(manga_id)).await?;

        print(&images)
    }

    pub async fn chapters(&self, manga_id: &str, lang: Option<&str>) -> Result<(), anyhow::Error> {
        let chapters = self.chapter.chapters(manga_id, lang).await?;

        print(&chapters)
    }

    pub async fn translate(&self, text: &str, target: &str) -> Result<(), anyhow::Error> {
        let translated = self.translate.translate(Some(text), Some(target)).await?;
        println!("{translated}");

        Ok(())
    }

    pub async fn genres(&self) -> Result<(), anyhow::Error> {
        let genres = self.rapidapi.genres().await?;

        print(&genres)
    }

    /// Prints the raw listing; failures only go to the log.
    pub async fn animedb(&self) {
        match self.rapidapi.animedb_manga_raw().await {
            Ok(raw) => println!("{raw}"),
            Err(e) => error!("Error fetching data: {e}"),
        }
    }
}
