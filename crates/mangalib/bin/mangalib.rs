#[macro_use]
extern crate log;

use clap::Parser;
use mangalib::{infrastructure::config::Config, presentation::ServerBuilder};

#[derive(Parser)]
struct Opts {
    /// Path to config file
    #[clap(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let mut logger = env_logger::Builder::from_default_env();
    if std::env::var("RUST_LOG").is_err() {
        if let Ok(mangalib_log) = std::env::var("MANGALIB_LOG") {
            logger.parse_filters(&format!(
                "mangalib={mangalib_log},mangalib_upstream={mangalib_log}"
            ));
        }
    }
    logger.init();

    let opts: Opts = Opts::parse();
    let config = Config::open(opts.config)?;

    debug!("config: {:?}", config.path());

    let server_fut = ServerBuilder::from_config(&config)?
        .build()?
        .serve(([0, 0, 0, 0], config.port));

    tokio::select! {
        res = server_fut => {
            res?;
            info!("server shutdown");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("ctrl+c signal");
        }
    }

    Ok(())
}
