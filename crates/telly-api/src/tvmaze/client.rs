use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use telly_core::config::ApiConfig;
use telly_core::models::{Episode, Show, ShowId};

use super::error::TvMazeError;
use super::types::{TvMazeEpisode, TvMazeShow};
use crate::traits::ShowSource;

const BASE_URL: &str = "https://api.tvmaze.com";

/// Delay before the first retry; later retries wait proportionally longer.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// TVMaze REST client.
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    base_url: String,
    http: Client,
    retries: u32,
    show_pages: u32,
}

impl Default for TvMazeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl TvMazeClient {
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            http: Client::new(),
            retries: 0,
            show_pages: 1,
        }
    }

    /// Build a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, TvMazeError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self {
            base_url: normalize_base(&config.base_url)?,
            http,
            retries: config.retries,
            show_pages: config.show_pages.max(1),
        })
    }

    /// Point the client at another host (mirrors, tests).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, TvMazeError> {
        self.base_url = normalize_base(base_url)?;
        Ok(self)
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_show_pages(mut self, pages: u32) -> Self {
        self.show_pages = pages.max(1);
        self
    }

    /// Fetch one page of the show index, or `None` past the last page.
    pub async fn shows_page(&self, page: u32) -> Result<Option<Vec<Show>>, TvMazeError> {
        let url = format!("{}/shows?page={page}", self.base_url);
        match self.get_json::<Vec<TvMazeShow>>(&url).await {
            Ok(shows) => Ok(Some(shows.into_iter().map(TvMazeShow::into_show).collect())),
            Err(TvMazeError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TvMazeError> {
        let mut attempt = 0;
        loop {
            match self.try_get_json(url).await {
                Err(e) if e.is_retryable() && attempt < self.retries => {
                    attempt += 1;
                    tracing::warn!(url, attempt, error = %e, "TVMaze request failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                }
                result => return result,
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, TvMazeError> {
        let resp = self.http.get(url).send().await?;
        let resp = Self::check_response(resp).await?;
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| TvMazeError::Parse(e.to_string()))
    }

    /// Check the HTTP response for errors and return the body text on failure.
    async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, TvMazeError> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            tracing::debug!(status, "TVMaze API error");
            Err(TvMazeError::Api {
                status,
                message: body,
            })
        }
    }
}

impl ShowSource for TvMazeClient {
    type Error = TvMazeError;

    async fn fetch_shows(&self) -> Result<Vec<Show>, TvMazeError> {
        let mut shows = Vec::new();
        for page in 0..self.show_pages {
            match self.shows_page(page).await? {
                Some(batch) => shows.extend(batch),
                None => break,
            }
        }
        tracing::info!(count = shows.len(), "Fetched shows");
        Ok(shows)
    }

    async fn fetch_episodes(&self, show_id: ShowId) -> Result<Vec<Episode>, TvMazeError> {
        let url = format!("{}/shows/{show_id}/episodes", self.base_url);
        let episodes: Vec<TvMazeEpisode> = self.get_json(&url).await?;
        tracing::info!(show_id, count = episodes.len(), "Fetched episodes");
        Ok(episodes
            .into_iter()
            .map(TvMazeEpisode::into_episode)
            .collect())
    }
}

/// Validate a base URL and strip its trailing slash.
fn normalize_base(base_url: &str) -> Result<String, TvMazeError> {
    let parsed = Url::parse(base_url)
        .map_err(|e| TvMazeError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TvMazeError::Config(format!(
            "unsupported URL scheme: {}",
            parsed.scheme()
        )));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
