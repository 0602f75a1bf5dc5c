use std::path::{Path, PathBuf};

use thiserror::Error;
use url::Url;

/// Default directory for output documents, relative to the working directory.
pub const DEFAULT_OUTPUT_ROOT: &str = "scraped_documentation";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutputPathError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("base url has no host: {0}")]
    MissingHost(String),
}

/// Domain label for a base URL: the host with a leading `www.` stripped.
pub fn domain_label(base_url: &str) -> Result<String, OutputPathError> {
    let parsed =
        Url::parse(base_url).map_err(|_| OutputPathError::InvalidBaseUrl(base_url.to_string()))?;
    let host = parsed
        .host_str()
        .ok_or_else(|| OutputPathError::MissingHost(base_url.to_string()))?;
    Ok(host.strip_prefix("www.").unwrap_or(host).to_string())
}

/// Output document path for a base URL: `{root}/{domain}.md`.
pub fn output_path(root: &Path, base_url: &str) -> Result<PathBuf, OutputPathError> {
    let domain = domain_label(base_url)?;
    Ok(root.join(format!("{domain}.md")))
}
