//! Headless message loop: seeds the core state from the environment the way
//! form fields would, then drives engine events through `update` until the
//! session returns to idle.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use docscrape_core::{update, AppState, Msg, SessionState};
use docscrape_engine::{ApiSettings, EngineConfig};

use crate::config::AppConfig;
use crate::effects::EffectRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Map the site and run the full pipeline.
    Scrape,
    /// Run only the mapper and report the URL count.
    Count,
}

impl Mode {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
        match args.next().as_deref() {
            None => Ok(Mode::Scrape),
            Some("count") => Ok(Mode::Count),
            Some(other) => Err(format!(
                "unknown argument '{other}'; run with no arguments to scrape, or 'count' \
                 to only count URLs"
            )),
        }
    }
}

pub fn run(mode: Mode, config: AppConfig) -> Result<(), String> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(engine_config(&config), msg_tx.clone());
    spawn_interrupt_forwarder(msg_tx);

    let mut state = AppState::new();
    let action = match mode {
        Mode::Count => Msg::CountUrlsClicked,
        Mode::Scrape => Msg::ScrapeClicked,
    };
    for msg in [
        Msg::BaseUrlChanged(config.base_url.clone()),
        Msg::ApiKeyChanged(config.api_key.clone()),
        Msg::LimitRateToggled(config.limit_rate),
        action,
    ] {
        state = dispatch(state, msg, &runner);
    }

    if state.session() == SessionState::Idle {
        // The action never started (the core rejected the inputs).
        return Err(state.view().status_line);
    }

    while state.session() != SessionState::Idle {
        match msg_rx.recv_timeout(Duration::from_secs(1)) {
            Ok(msg) => {
                state = dispatch(state, msg, &runner);
                render_progress(&mut state);
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                return Err("engine stopped unexpectedly".to_string());
            }
        }
    }

    println!("{}", state.view().status_line);
    Ok(())
}

/// Turns Ctrl-C into the cancel action. The in-flight fetch still finishes
/// and partial output is kept, same as cancelling from the form.
fn spawn_interrupt_forwarder(msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(_) => return,
        };
        while runtime.block_on(tokio::signal::ctrl_c()).is_ok() {
            if msg_tx.send(Msg::CancelClicked).is_err() {
                return;
            }
        }
    });
}

fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (state, effects) = update(state, msg);
    runner.enqueue(effects);
    state
}

fn render_progress(state: &mut AppState) {
    if !state.consume_dirty() {
        return;
    }
    if let Some(progress) = state.view().progress {
        println!("[{:>5.1}%] {}", progress.fraction * 100.0, progress.label);
    }
}

fn engine_config(config: &AppConfig) -> EngineConfig {
    let mut engine_config = EngineConfig::default();
    if let Some(api_url) = &config.api_url {
        engine_config.api = ApiSettings {
            api_url: api_url.clone(),
            ..engine_config.api
        };
    }
    if let Some(output_dir) = &config.output_dir {
        engine_config.output_root = output_dir.clone();
    }
    engine_config
}
