use std::time::Duration;

use super::config::Config;

pub const USER_AGENT: &str = concat!("mangalib/", env!("CARGO_PKG_VERSION"));

/// Shared client for every upstream; cloning it shares the connection pool.
pub fn build_client(config: &Config) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.request_timeout))
        .build()
}
