use std::time::Duration;

use serde::Deserialize;
use serde_json::json;

use crate::{ApiError, ApiFailure};

/// Connection settings for the hosted crawling service.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Service root, without a trailing slash.
    pub api_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_url: "https://api.firecrawl.dev".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The two operations consumed from the external service.
///
/// Both report failure explicitly; deciding whether to degrade (empty URL
/// list, empty page content) is the caller's business, not the client's.
#[async_trait::async_trait]
pub trait CrawlerApi: Send + Sync {
    /// Discover the URLs reachable from `base_url`. An empty list is a valid
    /// non-error result.
    async fn map_site(&self, base_url: &str, api_key: &str) -> Result<Vec<String>, ApiError>;

    /// Fetch a markdown rendition of one page.
    async fn scrape_page(&self, url: &str, api_key: &str) -> Result<String, ApiError>;
}

/// reqwest-backed client for the Firecrawl v1 HTTP API.
#[derive(Debug, Clone)]
pub struct FirecrawlClient {
    settings: ApiSettings,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct MapResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    links: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
}

#[derive(Debug, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
}

impl FirecrawlClient {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(ApiFailure::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    async fn post_json(
        &self,
        endpoint: &str,
        api_key: &str,
        body: serde_json::Value,
    ) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}/{endpoint}", self.settings.api_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                ApiFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl CrawlerApi for FirecrawlClient {
    async fn map_site(&self, base_url: &str, api_key: &str) -> Result<Vec<String>, ApiError> {
        reqwest::Url::parse(base_url)
            .map_err(|err| ApiError::new(ApiFailure::InvalidUrl, err.to_string()))?;

        let response = self
            .post_json("v1/map", api_key, json!({ "url": base_url }))
            .await?;
        let parsed: MapResponse = response
            .json()
            .await
            .map_err(|err| ApiError::new(ApiFailure::MalformedResponse, err.to_string()))?;

        match parsed {
            MapResponse {
                success: true,
                links: Some(links),
            } => Ok(links),
            _ => Err(ApiError::new(
                ApiFailure::MalformedResponse,
                "map response did not carry a link list",
            )),
        }
    }

    async fn scrape_page(&self, url: &str, api_key: &str) -> Result<String, ApiError> {
        let response = self
            .post_json(
                "v1/scrape",
                api_key,
                json!({ "url": url, "formats": ["markdown"] }),
            )
            .await?;
        let parsed: ScrapeResponse = response
            .json()
            .await
            .map_err(|err| ApiError::new(ApiFailure::MalformedResponse, err.to_string()))?;

        match parsed {
            ScrapeResponse {
                success: true,
                data:
                    Some(ScrapeData {
                        markdown: Some(markdown),
                    }),
            } => Ok(markdown),
            _ => Err(ApiError::new(
                ApiFailure::MalformedResponse,
                "scrape response did not carry markdown content",
            )),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(ApiFailure::Timeout, err.to_string());
    }
    ApiError::new(ApiFailure::Network, err.to_string())
}
