//! Executes core effects against the engine and forwards engine events back
//! into the message loop.

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docscrape_core::{Effect, Msg, RunResultKind};
use docscrape_engine::{EngineConfig, EngineEvent, EngineHandle, RunOutcome};
use engine_logging::{engine_info, engine_warn};

pub struct EffectRunner {
    engine: Arc<EngineHandle>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, msg_tx: mpsc::Sender<Msg>) -> Self {
        let engine = Arc::new(EngineHandle::new(config));
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::MapSite { base_url, api_key } => {
                    engine_info!("MapSite base_url={}", base_url);
                    self.engine.map_site(base_url, api_key);
                }
                Effect::StartScrape {
                    base_url,
                    api_key,
                    limit_rate,
                } => {
                    engine_info!("StartScrape base_url={} limit_rate={}", base_url, limit_rate);
                    self.engine.start_scrape(base_url, api_key, limit_rate);
                }
                Effect::CancelRun => {
                    engine_info!("CancelRun");
                    self.engine.cancel_run();
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.recv_timeout(Duration::from_millis(100)) {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            }
        });
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::MapCompleted { result } => Msg::MapCompleted {
            result: result
                .map(|urls| urls.len())
                .map_err(|err| err.to_string()),
        },
        EngineEvent::Progress { fraction, label } => Msg::ScrapeProgress { fraction, label },
        EngineEvent::ScrapeCompleted { result } => match result {
            Ok(RunOutcome::Completed {
                output_path,
                records,
            }) => {
                engine_info!("scrape completed with {} records", records);
                Msg::ScrapeCompleted {
                    result: RunResultKind::Completed,
                    detail: output_path.display().to_string(),
                }
            }
            Ok(RunOutcome::Cancelled {
                output_path,
                records,
            }) => {
                engine_info!("scrape cancelled with {} records", records);
                Msg::ScrapeCompleted {
                    result: RunResultKind::Cancelled,
                    detail: output_path.display().to_string(),
                }
            }
            Err(err) => {
                engine_warn!("scrape failed: {}", err);
                Msg::ScrapeCompleted {
                    result: RunResultKind::Failed,
                    detail: err.message,
                }
            }
        },
    }
}
