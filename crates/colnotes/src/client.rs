use crate::config::GitHubConfig;
use crate::prelude::*;
use colnotes_core::column::{column_cards_url, column_url};
use colnotes_core::github::{ColumnCard, ColumnData, ContentItem};
use serde::de::DeserializeOwned;

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// Authenticated client for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    api_base: String,
}

impl GitHubClient {
    /// Create a client that sends the GitHub headers on every request
    pub fn new(config: &GitHubConfig) -> Result<Self, Error> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MEDIA_TYPE));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.token))
                .map_err(|e| Error::Configuration(f!("Invalid header value: {e}")))?,
        );
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("colnotes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Configuration(f!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
        })
    }

    /// Issue one GET and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Error> {
        log::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        log::debug!("GET {url} -> {status}");

        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Decode(e.to_string()))
    }

    /// Fetch column metadata
    pub async fn fetch_column_data(&self, column_id: u64) -> Result<ColumnData, Error> {
        self.get_json(&column_url(&self.api_base, column_id)).await
    }

    /// Fetch the cards of a column, in board order
    pub async fn fetch_column_cards(&self, column_id: u64) -> Result<Vec<ColumnCard>, Error> {
        self.get_json(&column_cards_url(&self.api_base, column_id))
            .await
    }

    /// Fetch the issue or pull request behind a card's `content_url`
    pub async fn fetch_content(&self, content_url: &str) -> Result<ContentItem, Error> {
        self.get_json(content_url).await
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}
