//! Example: Collect a small labeled image set for one keyword.

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
    let controller = BatchController::new(DatasetLayout::new("dataset"), search, downloader);

    println!("Collecting up to 10 images for \"shiba inu\"...");

    let summary = controller.run("shiba inu", 10, None).await?;

    for run in summary.runs() {
        println!(
            "{}: {} of {} downloaded",
            run.label, run.downloaded, run.found
        );
        if !run.failed.is_empty() {
            println!("   failed entries: {:?}", run.failed);
        }
    }

    Ok(())
}
