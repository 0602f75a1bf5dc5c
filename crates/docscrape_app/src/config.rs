//! Environment configuration for headless runs.

use std::env;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BASE_URL is not set; export the base URL of the site to scrape")]
    MissingBaseUrl,
    #[error("FIRECRAWL_API_KEY is not set; get a key from https://firecrawl.dev/")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub api_key: String,
    pub limit_rate: bool,
    /// Override for the service root; `None` means the public endpoint.
    pub api_url: Option<String>,
    /// Override for the output directory; `None` means `scraped_documentation`.
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Missing base URL or API key is reported here, before any network
    /// activity starts.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = non_empty_var("BASE_URL").ok_or(ConfigError::MissingBaseUrl)?;
        let api_key = non_empty_var("FIRECRAWL_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let limit_rate = limit_rate_from(env::var("LIMIT_RATE").ok().as_deref());
        let api_url = non_empty_var("FIRECRAWL_API_URL");
        let output_dir = non_empty_var("OUTPUT_DIR").map(PathBuf::from);

        Ok(Self {
            base_url,
            api_key,
            limit_rate,
            api_url,
            output_dir,
        })
    }
}

/// Throttling is opt-in for headless runs: only an explicit truthy value
/// turns it on, an absent variable leaves it off.
fn limit_rate_from(value: Option<&str>) -> bool {
    value.map(parse_flag).unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim(), "True" | "true" | "1")
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
