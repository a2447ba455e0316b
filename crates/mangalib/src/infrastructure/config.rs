use std::path::{Path, PathBuf};

use mangalib_upstream::{anilist, animedb, jikan, mangadex, mangaverse, myanimelist, translate};
use serde::{Deserialize, Serialize};

pub const RAPIDAPI_KEY_ENV: &str = "RAPIDAPI_KEY";
pub const GOOGLE_TRANSLATE_API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PopularConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_cover_concurrency")]
    pub cover_concurrency: usize,
}

impl Default for PopularConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            cover_concurrency: default_cover_concurrency(),
        }
    }
}

/// Base URLs of every upstream service.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct UpstreamConfig {
    pub mangadex_api: String,
    pub mangadex_uploads: String,
    pub jikan_api: String,
    pub anilist_api: String,
    pub mangaverse_api: String,
    pub myanimelist_api: String,
    pub animedb_api: String,
    pub translate_api: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            mangadex_api: mangadex::API_URL.to_string(),
            mangadex_uploads: mangadex::UPLOADS_URL.to_string(),
            jikan_api: jikan::API_URL.to_string(),
            anilist_api: anilist::API_URL.to_string(),
            mangaverse_api: mangaverse::API_URL.to_string(),
            myanimelist_api: myanimelist::API_URL.to_string(),
            animedb_api: animedb::API_URL.to_string(),
            translate_api: translate::API_URL.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LibraryBackend {
    #[default]
    Memory,
    File,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LibraryConfig {
    #[serde(default)]
    pub backend: LibraryBackend,
    #[serde(default = "default_library_path")]
    pub path: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            backend: LibraryBackend::default(),
            path: default_library_path(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_placeholder_thumbnail")]
    pub placeholder_thumbnail: String,
    /// Seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    #[serde(default = "default_enable_cors")]
    pub enable_cors: bool,
    #[serde(default)]
    pub popular: PopularConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default, skip_serializing)]
    pub rapidapi_key: Option<String>,
    #[serde(default, skip_serializing)]
    pub google_translate_api_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: mangalib_home().join("config.yml"),
            port: default_port(),
            placeholder_thumbnail: default_placeholder_thumbnail(),
            request_timeout: default_request_timeout(),
            enable_cors: default_enable_cors(),
            popular: PopularConfig::default(),
            upstream: UpstreamConfig::default(),
            library: LibraryConfig::default(),
            rapidapi_key: None,
            google_translate_api_key: None,
        }
    }
}

pub fn mangalib_home() -> PathBuf {
    match std::env::var("MANGALIB_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir().unwrap_or_default().join(".mangalib"),
    }
}

fn default_port() -> u16 {
    3000
}

fn default_placeholder_thumbnail() -> String {
    "/1.png".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_enable_cors() -> bool {
    true
}

fn default_page_size() -> usize {
    300
}

fn default_cover_concurrency() -> usize {
    32
}

fn default_library_path() -> String {
    mangalib_home().join("library").display().to_string()
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => mangalib_home().join("config.yml"),
        };

        let cfg = match std::fs::File::open(&config_path) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                cfg
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                cfg
            }
        };

        Ok(cfg.with_env(|key| std::env::var(key).ok()))
    }

    /// Secrets are never part of the written document.
    pub fn save(&self) -> Result<(), anyhow::Error> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys found in the environment take precedence over the file.
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value: &String| !value.is_empty());

        if let Some(key) = non_empty(RAPIDAPI_KEY_ENV) {
            self.rapidapi_key = Some(key);
        }
        if let Some(key) = non_empty(GOOGLE_TRANSLATE_API_KEY_ENV) {
            self.google_translate_api_key = Some(key);
        }

        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_partial_document_uses_defaults() {
        let cfg: Config = serde_yml::from_str(
            "port: 8080\npopular:\n  page_size: 50\nupstream:\n  jikan_api: http://127.0.0.1:9000\n",
        )
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.popular.page_size, 50);
        assert_eq!(cfg.popular.cover_concurrency, 32);
        assert_eq!(cfg.upstream.jikan_api, "http://127.0.0.1:9000");
        assert_eq!(cfg.upstream.mangadex_api, mangadex::API_URL);
        assert_eq!(cfg.placeholder_thumbnail, "/1.png");
        assert_eq!(cfg.library.backend, LibraryBackend::Memory);
        assert!(cfg.enable_cors);
    }

    #[test]
    fn test_env_overrides_file_keys() {
        let cfg: Config =
            serde_yml::from_str("rapidapi_key: from-file\ngoogle_translate_api_key: g-file\n")
                .unwrap();

        let cfg = cfg.with_env(|key| match key {
            RAPIDAPI_KEY_ENV => Some("from-env".to_string()),
            GOOGLE_TRANSLATE_API_KEY_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(cfg.rapidapi_key.as_deref(), Some("from-env"));
        assert_eq!(cfg.google_translate_api_key.as_deref(), Some("g-file"));
    }

    #[test]
    fn test_open_writes_defaults_without_secrets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yml");

        let mut cfg = Config::open(Some(&path)).unwrap();
        cfg.rapidapi_key = Some("secret".to_string());
        cfg.save().unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("port: 3000"));
        assert!(!written.contains("secret"));
        assert!(!written.contains("rapidapi_key"));
    }

    #[test]
    fn test_library_backend_names() {
        let cfg: LibraryConfig =
            serde_yml::from_str("backend: file\npath: /tmp/library\n").unwrap();

        assert_eq!(cfg.backend, LibraryBackend::File);
        assert_eq!(cfg.path, "/tmp/library");
    }
}
