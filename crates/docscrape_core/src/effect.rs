#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run only the site mapper and report the URL count.
    MapSite { base_url: String, api_key: String },
    /// Map the site and run the full fetch-and-persist pipeline.
    StartScrape {
        base_url: String,
        api_key: String,
        limit_rate: bool,
    },
    /// Signal the running pipeline to stop before its next fetch.
    CancelRun,
}
