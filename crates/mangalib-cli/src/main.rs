#[macro_use]
extern crate log;

mod commands;

use clap::{Parser, Subcommand};
use mangalib::infrastructure::config::Config;

#[derive(Parser)]
#[clap(version, about = "Query the mangalib sources from the terminal")]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Popular manga from every source
    Popular {
        #[clap(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Page images of the first English chapter of a MangaDex manga
    Images { manga_id: String },
    /// Chapter list of a MangaDex manga, one per chapter number
    Chapters {
        manga_id: String,
        #[clap(short, long)]
        lang: Option<String>,
    },
    Translate {
        text: String,
        #[clap(short, long, default_value = "en")]
        target: String,
    },
    /// Manga genres from MyAnimeList
    Genres,
    /// Dump the raw AnimeDB manga listing
    Animedb,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    env_logger::init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;
    let services = commands::Services::from_config(&config)?;

    match opts.subcmd {
        Command::Popular { page } => services.popular(page).await?,
        Command::Images { manga_id } => services.images(&manga_id).await?,
        Command::Chapters { manga_id, lang } => {
            services.chapters(&manga_id, lang.as_deref()).await?
        }
        Command::Translate { text, target } => services.translate(&text, &target).await?,
        Command::Genres => services.genres().await?,
        Command::Animedb => services.animedb().await,
    }

    Ok(())
}
