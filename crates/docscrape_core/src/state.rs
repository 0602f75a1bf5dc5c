use crate::view_model::{AppViewModel, ProgressView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// A standalone map request ("count URLs") is in flight.
    Counting,
    /// The full pipeline is running.
    Scraping,
    /// Cancellation requested; waiting for the pipeline to acknowledge.
    Cancelling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunResultKind {
    Completed,
    Cancelled,
    Failed,
}

/// Control-surface state. All mutation goes through [`crate::update`]; the
/// state itself performs no IO.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    base_url: String,
    api_key: String,
    limit_rate: bool,
    session: SessionState,
    status: String,
    url_count: Option<usize>,
    progress: Option<ProgressView>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            // Mirrors the free-tier default: throttling on unless disabled.
            limit_rate: true,
            ..Self::default()
        }
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            status_line: self.status.clone(),
            url_count: self.url_count,
            progress: self.progress.clone(),
            limit_rate: self.limit_rate,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The host renders when this was
    /// set since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn limit_rate(&self) -> bool {
        self.limit_rate
    }

    pub(crate) fn set_base_url(&mut self, text: String) {
        self.base_url = text;
        self.dirty = true;
    }

    pub(crate) fn set_api_key(&mut self, text: String) {
        self.api_key = text;
        self.dirty = true;
    }

    pub(crate) fn set_limit_rate(&mut self, enabled: bool) {
        self.limit_rate = enabled;
        self.dirty = true;
    }

    pub(crate) fn set_status(&mut self, message: String) {
        self.status = message;
        self.dirty = true;
    }

    pub(crate) fn begin_count(&mut self) {
        self.session = SessionState::Counting;
        self.url_count = None;
        self.set_status("Counting URLs...".to_string());
    }

    pub(crate) fn begin_scrape(&mut self, base_url: &str) {
        self.session = SessionState::Scraping;
        self.progress = None;
        self.set_status(format!("Scraping {base_url}..."));
    }

    pub(crate) fn begin_cancel(&mut self) {
        self.session = SessionState::Cancelling;
        self.set_status("Cancelling...".to_string());
    }

    pub(crate) fn finish_count(&mut self, count: usize) {
        self.session = SessionState::Idle;
        self.url_count = Some(count);
        self.set_status(format!(
            "{count} URLs found. Do you want to proceed with scraping?"
        ));
    }

    pub(crate) fn fail_count(&mut self, message: String) {
        self.session = SessionState::Idle;
        self.url_count = None;
        self.set_status(format!("Failed to map the website: {message}"));
    }

    pub(crate) fn apply_progress(&mut self, fraction: f32, label: String) {
        // Progress can only belong to a running (or cancelling) scrape.
        if matches!(self.session, SessionState::Scraping | SessionState::Cancelling) {
            self.progress = Some(ProgressView { fraction, label });
            self.dirty = true;
        }
    }

    pub(crate) fn finish_run(&mut self, result: RunResultKind, detail: String) {
        self.session = SessionState::Idle;
        self.progress = None;
        let status = match result {
            RunResultKind::Completed => {
                format!("Scraping completed. Output saved to {detail}")
            }
            RunResultKind::Cancelled => {
                format!("Scraping cancelled. Partial output saved to {detail}")
            }
            RunResultKind::Failed => format!("Scraping failed: {detail}"),
        };
        self.set_status(status);
    }
}
