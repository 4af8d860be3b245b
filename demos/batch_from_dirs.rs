//! Example: Refill every class directory of an existing dataset.
//!
//! Expands `dataset/images/*` into one query per class directory and skips
//! directories that already hold at least 50 files.

use std::sync::Arc;

use imgharvest::{
    BatchController, DatasetLayout, Downloader, HttpFetcher, RetryPolicy, SearchClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    let retry = RetryPolicy::default();
    let search = SearchClient::new(Arc::new(HttpFetcher::new()), retry);
    let downloader = Downloader::new(retry);
    let controller = BatchController::new(DatasetLayout::new("dataset"), search, downloader)
        .with_skip_threshold(50);

    let summary = controller.run("dataset/images/*", 100, None).await?;

    println!(
        "Batch finished: {} downloaded, {} failed, {} directories skipped",
        summary.total_downloaded(),
        summary.total_failed(),
        summary.skipped_count()
    );

    Ok(())
}
