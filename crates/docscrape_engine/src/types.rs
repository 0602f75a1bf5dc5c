use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Error from the external crawling service, or from reaching it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiFailure,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: ApiFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiFailure {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    /// The service answered 2xx but the body did not carry the expected shape.
    MalformedResponse,
    Network,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::InvalidUrl => write!(f, "invalid url"),
            ApiFailure::HttpStatus(code) => write!(f, "http status {code}"),
            ApiFailure::Timeout => write!(f, "timeout"),
            ApiFailure::MalformedResponse => write!(f, "malformed response"),
            ApiFailure::Network => write!(f, "network error"),
        }
    }
}

/// How a pipeline run ended. Cancellation is not an error; records written
/// before the cancellation point are retained either way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed { output_path: PathBuf, records: usize },
    Cancelled { output_path: PathBuf, records: usize },
}

impl RunOutcome {
    pub fn records(&self) -> usize {
        match self {
            RunOutcome::Completed { records, .. } | RunOutcome::Cancelled { records, .. } => {
                *records
            }
        }
    }

    pub fn output_path(&self) -> &PathBuf {
        match self {
            RunOutcome::Completed { output_path, .. }
            | RunOutcome::Cancelled { output_path, .. } => output_path,
        }
    }
}

/// A run failure carried over the event channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub message: String,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// Batch-pause policy for the external service's request quota.
///
/// The free tier allows roughly 10 requests per minute, hence the defaults:
/// after every 10th fetch the pipeline pauses for a full minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThrottleSettings {
    pub enabled: bool,
    pub batch_size: usize,
    pub pause: Duration,
}

impl Default for ThrottleSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            batch_size: 10,
            pause: Duration::from_secs(60),
        }
    }
}

impl ThrottleSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Events emitted by the engine towards the host application.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Result of a standalone map request (the "count URLs" action).
    MapCompleted {
        result: Result<Vec<String>, ApiError>,
    },
    /// Pipeline progress: fraction of the URL set processed plus a label.
    Progress { fraction: f32, label: String },
    /// The scrape run ended, one way or another.
    ScrapeCompleted { result: Result<RunOutcome, RunError> },
}
