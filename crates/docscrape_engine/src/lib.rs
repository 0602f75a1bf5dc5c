//! Docscrape engine: crawling-service client and the fetch-and-persist pipeline.
mod api;
mod engine;
mod output;
mod persist;
mod pipeline;
mod progress;
mod types;

pub use api::{ApiSettings, CrawlerApi, FirecrawlClient};
pub use engine::{EngineConfig, EngineHandle};
pub use output::{domain_label, output_path, OutputPathError, DEFAULT_OUTPUT_ROOT};
pub use persist::{ensure_output_dir, PersistError, RecordWriter};
pub use pipeline::run_pipeline;
pub use progress::{ChannelProgressSink, NullProgressSink, ProgressSink};
pub use types::{ApiError, ApiFailure, EngineEvent, RunError, RunOutcome, ThrottleSettings};
