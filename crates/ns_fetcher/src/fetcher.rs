use std::fmt;
use std::time::Duration;

use ns_core::{Error, FetchResult, Result};
use reqwest::{Client, StatusCode};
use url::Url;

use crate::extract::{extract_paragraphs, extract_structured, parse_url};
use crate::logging::Logger;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

pub struct ArticleFetcher {
    client: Client,
    config: FetchConfig,
}

impl fmt::Debug for ArticleFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleFetcher")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

impl ArticleFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Resolves an article URL to its text. Structured extraction is tried first;
    /// any failure there falls back to scraping every paragraph of the page.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        let url = parse_url(url)?;
        let logger = Logger::new().with_prefix(url.host_str().unwrap_or("unknown"));

        match self.fetch_structured(&url).await {
            Ok(text) => {
                logger.debug(&format!("Extracted {} chars of structured article text", text.len()));
                return Ok(text);
            }
            Err(e) => logger.debug(&format!("Structured extraction failed, scraping paragraphs: {}", e)),
        }

        let result = self.fetch_paragraphs(&url).await;
        if let Err(e) = &result {
            logger.warn(&e.to_string());
        }
        result
    }

    async fn fetch_structured(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Fetch(format!("status code {}", response.status().as_u16())));
        }
        let html = response.text().await.map_err(|e| Error::Fetch(e.to_string()))?;
        extract_structured(&html, url).ok_or_else(|| Error::Fetch("page has no article content".to_string()))
    }

    async fn fetch_paragraphs(&self, url: &Url) -> FetchResult {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Fetch(format!("could not fetch article: {}", e)))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Fetch(format!(
                "failed to fetch article (status code: {})",
                status.as_u16()
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::Fetch(format!("could not fetch article: {}", e)))?;
        let text = extract_paragraphs(&html);
        if text.trim().is_empty() {
            return Err(Error::Fetch("no extractable text".to_string()));
        }
        Ok(text)
    }
}
