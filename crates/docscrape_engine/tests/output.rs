use std::path::Path;

use docscrape_engine::{domain_label, output_path, OutputPathError};

#[test]
fn domain_label_strips_scheme_and_www() {
    assert_eq!(
        domain_label("https://www.example.com/docs").unwrap(),
        "example.com"
    );
    assert_eq!(domain_label("http://docs.rs/serde").unwrap(), "docs.rs");
}

#[test]
fn domain_label_keeps_inner_www() {
    // Only a leading `www.` is stripped.
    assert_eq!(domain_label("https://wwwows.example.com").unwrap(), "wwwows.example.com");
}

#[test]
fn output_path_joins_root_and_domain() {
    let path = output_path(Path::new("scraped_documentation"), "https://www.example.com").unwrap();
    assert_eq!(path, Path::new("scraped_documentation").join("example.com.md"));
}

#[test]
fn invalid_base_url_is_rejected() {
    assert_eq!(
        domain_label("not a url"),
        Err(OutputPathError::InvalidBaseUrl("not a url".to_string()))
    );
}

#[test]
fn base_url_without_host_is_rejected() {
    assert_eq!(
        domain_label("mailto:user@example.com"),
        Err(OutputPathError::MissingHost(
            "mailto:user@example.com".to_string()
        ))
    );
}
