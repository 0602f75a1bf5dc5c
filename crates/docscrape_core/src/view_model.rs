use crate::SessionState;

/// Snapshot of the control-surface state for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub status_line: String,
    pub url_count: Option<usize>,
    pub progress: Option<ProgressView>,
    pub limit_rate: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressView {
    /// Fraction of the URL set processed so far, in `0..=1`.
    pub fraction: f32,
    pub label: String,
}
