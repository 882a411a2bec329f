use reqwest::{redirect, Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::error::{AppError, Result};

const USER_AGENT: &str = concat!("wiki-outline/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// Retrieves article markup for an entity name.
///
/// Every failure mode (bad URL, transport error, timeout, non-2xx status,
/// empty body) is reported as [`AppError::FetchFailure`]; the underlying cause only
/// reaches the log.
#[derive(Debug, Clone)]
pub struct ArticleFetcher {
    client: Client,
    base_url: Url,
}

impl ArticleFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::config(format!("Invalid article base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "Article base URL cannot carry a path: {}",
                base_url
            )));
        }

        let client = ClientBuilder::new()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// Article address for `entity`: spaces become underscores and the
    /// name is percent-encoded as a single path segment.
    pub fn article_url(&self, entity: &str) -> Result<Url> {
        let slug = entity.replace(' ', "_");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::FetchFailure(entity.to_string()))?
            .pop_if_empty()
            .push(&slug);
        Ok(url)
    }

    #[instrument(skip(self))]
    pub async fn fetch(&self, entity: &str) -> Result<String> {
        if entity.trim().is_empty() {
            warn!("refusing to fetch an empty entity name");
            return Err(AppError::FetchFailure(entity.to_string()));
        }

        let url = self.article_url(entity)?;
        debug!(%url, "fetching article");

        let result: std::result::Result<String, reqwest::Error> = async {
            let response = self.client.get(url.clone()).send().await?.error_for_status()?;
            response.text().await
        }
        .await;

        match result {
            Ok(html) if html.is_empty() => {
                warn!(%url, "article body is empty");
                Err(AppError::FetchFailure(entity.to_string()))
            }
            Ok(html) => {
                debug!(bytes = html.len(), "article fetched");
                Ok(html)
            }
            Err(e) => {
                warn!(%url, error = %e, "article fetch failed");
                Err(AppError::FetchFailure(entity.to_string()))
            }
        }
    }
}
