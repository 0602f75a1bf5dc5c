use std::fs;
use std::time::Duration;

use docscrape_engine::{
    ApiSettings, EngineConfig, EngineEvent, EngineHandle, RunOutcome, ThrottleSettings,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, temp: &TempDir) -> EngineConfig {
    EngineConfig {
        api: ApiSettings {
            api_url: server.uri(),
            ..ApiSettings::default()
        },
        output_root: temp.path().join("scraped_documentation"),
        throttle: ThrottleSettings::disabled(),
    }
}

fn wait_for(engine: &EngineHandle, mut pred: impl FnMut(&EngineEvent) -> bool) -> EngineEvent {
    let deadline = std::time::Instant::now() + Duration::from_secs(10);
    while std::time::Instant::now() < deadline {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
            if pred(&event) {
                return event;
            }
        }
    }
    panic!("engine event not received in time");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn map_command_reports_url_count() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://example.com/a", "https://example.com/b", "https://example.com/c"]
        })))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(config_for(&server, &temp));
    engine.map_site("https://example.com", "test-key");

    let event = wait_for(&engine, |e| matches!(e, EngineEvent::MapCompleted { .. }));
    match event {
        EngineEvent::MapCompleted { result } => assert_eq!(result.unwrap().len(), 3),
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scrape_command_maps_fetches_and_persists() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "links": ["https://example.com/a", "https://example.com/b"]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/scrape"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "markdown": "Page body" }
        })))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(config_for(&server, &temp));
    engine.start_scrape("https://example.com", "test-key", false);

    let mut saw_progress = false;
    let event = wait_for(&engine, |e| {
        if matches!(e, EngineEvent::Progress { .. }) {
            saw_progress = true;
        }
        matches!(e, EngineEvent::ScrapeCompleted { .. })
    });
    assert!(saw_progress);

    let outcome = match event {
        EngineEvent::ScrapeCompleted { result } => result.unwrap(),
        other => panic!("unexpected event {other:?}"),
    };
    let expected_path = temp
        .path()
        .join("scraped_documentation")
        .join("example.com.md");
    assert_eq!(
        outcome,
        RunOutcome::Completed {
            output_path: expected_path.clone(),
            records: 2
        }
    );
    assert_eq!(
        fs::read_to_string(expected_path).unwrap(),
        "# https://example.com/a\n\nPage body\n\n---\n\n\
         # https://example.com/b\n\nPage body\n\n---\n\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scrape_degrades_mapping_failure_to_empty_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/map"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(config_for(&server, &temp));
    engine.start_scrape("https://example.com", "test-key", false);

    let event = wait_for(&engine, |e| {
        matches!(e, EngineEvent::ScrapeCompleted { .. })
    });
    let outcome = match event {
        EngineEvent::ScrapeCompleted { result } => result.unwrap(),
        other => panic!("unexpected event {other:?}"),
    };
    // "No URLs found": the document exists and holds zero records.
    assert_eq!(outcome.records(), 0);
    assert_eq!(fs::read_to_string(outcome.output_path()).unwrap(), "");
}
