use engine_logging::{engine_info, engine_warn};
use tokio_util::sync::CancellationToken;

use crate::api::CrawlerApi;
use crate::persist::{PersistError, RecordWriter};
use crate::progress::ProgressSink;
use crate::types::{RunOutcome, ThrottleSettings};

/// Drives the URL set through scrape-and-append, strictly in order.
///
/// One record is appended per URL, in URL-set order, and flushed before the
/// next fetch starts. A scrape failure degrades to a record with empty
/// content and the run continues; a persistence failure aborts the run.
///
/// The cancellation token is polled before each fetch and honored during the
/// throttle pause; it never interrupts a fetch already in flight.
pub async fn run_pipeline(
    api: &dyn CrawlerApi,
    api_key: &str,
    urls: &[String],
    writer: &mut RecordWriter,
    throttle: &ThrottleSettings,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
) -> Result<RunOutcome, PersistError> {
    let total = urls.len();
    for (i, url) in urls.iter().enumerate() {
        if cancel.is_cancelled() {
            engine_info!("run cancelled after {} of {} records", writer.records(), total);
            return Ok(cancelled(writer));
        }

        progress.report(i as f32 / total as f32, &format!("Scraping {url}"));
        engine_info!("scraping {} ({}/{})", url, i + 1, total);

        let content = match api.scrape_page(url, api_key).await {
            Ok(markdown) => markdown,
            Err(err) => {
                engine_warn!("failed to scrape {}: {}", url, err);
                String::new()
            }
        };

        writer.append_record(url, &content)?;

        if throttle.enabled && throttle.batch_size > 0 && (i + 1) % throttle.batch_size == 0 {
            engine_info!(
                "rate limit batch reached, waiting for {} seconds",
                throttle.pause.as_secs()
            );
            tokio::select! {
                _ = cancel.cancelled() => {
                    engine_info!("run cancelled during rate limit pause");
                    return Ok(cancelled(writer));
                }
                _ = tokio::time::sleep(throttle.pause) => {}
            }
        }
    }

    Ok(RunOutcome::Completed {
        output_path: writer.path().to_path_buf(),
        records: writer.records(),
    })
}

fn cancelled(writer: &RecordWriter) -> RunOutcome {
    RunOutcome::Cancelled {
        output_path: writer.path().to_path_buf(),
        records: writer.records(),
    }
}
