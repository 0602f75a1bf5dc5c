use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::BaseUrlChanged(text) => {
            state.set_base_url(text);
            Vec::new()
        }
        Msg::ApiKeyChanged(text) => {
            state.set_api_key(text);
            Vec::new()
        }
        Msg::LimitRateToggled(enabled) => {
            state.set_limit_rate(enabled);
            Vec::new()
        }
        Msg::CountUrlsClicked => {
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            match validated_inputs(&state) {
                Ok((base_url, api_key)) => {
                    state.begin_count();
                    vec![Effect::MapSite { base_url, api_key }]
                }
                Err(message) => {
                    state.set_status(message);
                    Vec::new()
                }
            }
        }
        Msg::ScrapeClicked => {
            if state.session() != SessionState::Idle {
                return (state, Vec::new());
            }
            match validated_inputs(&state) {
                Ok((base_url, api_key)) => {
                    let limit_rate = state.limit_rate();
                    state.begin_scrape(&base_url);
                    vec![Effect::StartScrape {
                        base_url,
                        api_key,
                        limit_rate,
                    }]
                }
                Err(message) => {
                    state.set_status(message);
                    Vec::new()
                }
            }
        }
        Msg::CancelClicked => {
            if state.session() == SessionState::Scraping {
                state.begin_cancel();
                vec![Effect::CancelRun]
            } else {
                Vec::new()
            }
        }
        Msg::MapCompleted { result } => {
            match result {
                Ok(count) => state.finish_count(count),
                Err(message) => state.fail_count(message),
            }
            Vec::new()
        }
        Msg::ScrapeProgress { fraction, label } => {
            state.apply_progress(fraction, label);
            Vec::new()
        }
        Msg::ScrapeCompleted { result, detail } => {
            state.finish_run(result, detail);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Both actions need a base URL and an API key before any network activity.
fn validated_inputs(state: &AppState) -> Result<(String, String), String> {
    let api_key = state.api_key().trim().to_string();
    if api_key.is_empty() {
        return Err("Please enter your Firecrawl API key.".to_string());
    }
    let base_url = state.base_url().trim().to_string();
    if base_url.is_empty() {
        return Err("Please enter a base URL to scrape.".to_string());
    }
    if url::Url::parse(&base_url).is_err() {
        return Err(format!("Not a valid URL: {base_url}"));
    }
    Ok((base_url, api_key))
}
