use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::engine_warn;
use tokio_util::sync::CancellationToken;

use crate::api::{ApiSettings, CrawlerApi, FirecrawlClient};
use crate::output::{output_path, DEFAULT_OUTPUT_ROOT};
use crate::persist::RecordWriter;
use crate::pipeline::run_pipeline;
use crate::progress::ChannelProgressSink;
use crate::types::{EngineEvent, RunError, RunOutcome, ThrottleSettings};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub api: ApiSettings,
    pub output_root: PathBuf,
    pub throttle: ThrottleSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            throttle: ThrottleSettings::default(),
        }
    }
}

enum EngineCommand {
    MapSite {
        base_url: String,
        api_key: String,
    },
    StartScrape {
        base_url: String,
        api_key: String,
        limit_rate: bool,
    },
    CancelRun,
}

/// Handle to the engine's worker thread.
///
/// Commands go in over a channel; the worker owns a tokio runtime and runs at
/// most one scrape at a time. `CancelRun` cancels the current run's token; it
/// is processed even while the run is in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            let client = match FirecrawlClient::new(config.api.clone()) {
                Ok(client) => Arc::new(client),
                Err(err) => {
                    let _ = event_tx.send(EngineEvent::ScrapeCompleted {
                        result: Err(RunError {
                            message: err.to_string(),
                        }),
                    });
                    return;
                }
            };

            let mut current_cancel = CancellationToken::new();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::CancelRun => current_cancel.cancel(),
                    EngineCommand::MapSite { base_url, api_key } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = client.map_site(&base_url, &api_key).await;
                            let _ = event_tx.send(EngineEvent::MapCompleted { result });
                        });
                    }
                    EngineCommand::StartScrape {
                        base_url,
                        api_key,
                        limit_rate,
                    } => {
                        current_cancel = CancellationToken::new();
                        let cancel = current_cancel.clone();
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        let config = config.clone();
                        runtime.spawn(async move {
                            let result = scrape_site(
                                client.as_ref(),
                                &config,
                                &base_url,
                                &api_key,
                                limit_rate,
                                cancel,
                                event_tx.clone(),
                            )
                            .await;
                            let _ = event_tx.send(EngineEvent::ScrapeCompleted {
                                result: result.map_err(|message| RunError { message }),
                            });
                        });
                    }
                }
            }
        });

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    /// Run only the site mapper; reported back as `MapCompleted`.
    pub fn map_site(&self, base_url: impl Into<String>, api_key: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::MapSite {
            base_url: base_url.into(),
            api_key: api_key.into(),
        });
    }

    /// Map the site and run the full pipeline over the discovered URLs.
    pub fn start_scrape(
        &self,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        limit_rate: bool,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::StartScrape {
            base_url: base_url.into(),
            api_key: api_key.into(),
            limit_rate,
        });
    }

    /// Signal the running scrape to stop before its next fetch.
    pub fn cancel_run(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelRun);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv_timeout(timeout).ok()
    }
}

/// Full scrape flow: map, then fetch-and-persist.
///
/// A mapping failure degrades to "no URLs found" here, matching the headless
/// flow where mapping is an internal step of the scrape; the standalone map
/// command reports its failure explicitly instead.
async fn scrape_site(
    api: &dyn CrawlerApi,
    config: &EngineConfig,
    base_url: &str,
    api_key: &str,
    limit_rate: bool,
    cancel: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) -> Result<RunOutcome, String> {
    let urls = match api.map_site(base_url, api_key).await {
        Ok(urls) => urls,
        Err(err) => {
            engine_warn!("failed to map {}: {}", base_url, err);
            Vec::new()
        }
    };

    let path = output_path(&config.output_root, base_url).map_err(|err| err.to_string())?;
    let mut writer = RecordWriter::create(&path).map_err(|err| err.to_string())?;
    let throttle = ThrottleSettings {
        enabled: limit_rate,
        ..config.throttle.clone()
    };
    let sink = ChannelProgressSink::new(event_tx);

    run_pipeline(api, api_key, &urls, &mut writer, &throttle, &sink, &cancel)
        .await
        .map_err(|err| err.to_string())
}
