#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the base URL field.
    BaseUrlChanged(String),
    /// User edited the API key field.
    ApiKeyChanged(String),
    /// User toggled the "limit rate" checkbox.
    LimitRateToggled(bool),
    /// User asked for a URL count without scraping.
    CountUrlsClicked,
    /// User started a full scrape run.
    ScrapeClicked,
    /// User requested cancellation of the running scrape.
    CancelClicked,
    /// The mapper finished for a count request.
    MapCompleted { result: Result<usize, String> },
    /// Pipeline progress for the running scrape.
    ScrapeProgress { fraction: f32, label: String },
    /// The pipeline finished; `detail` is the output path or failure text.
    ScrapeCompleted {
        result: crate::RunResultKind,
        detail: String,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
