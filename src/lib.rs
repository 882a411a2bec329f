pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod headings;
pub mod outline;

use std::sync::Arc;
use config::Config;
use error::Result;
use fetch::ArticleFetcher;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetcher: ArticleFetcher,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = ArticleFetcher::new(&config.wiki_base_url, config.fetch_timeout)?;
        Ok(AppState {
            config: Arc::new(config),
            fetcher,
        })
    }
}
