//! imgharvest CLI - collect labeled image datasets from web image search.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use imgharvest::{
    BatchController, DatasetLayout, Downloader, HttpFetcher, RetryPolicy, SearchClient,
};

/// Collect labeled images from web image search
#[derive(Parser)]
#[command(name = "imgharvest")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Query file, directory glob, or literal search keyword
    target: String,

    /// Maximum number of images per query
    count: usize,

    /// Dataset output root directory
    output: PathBuf,

    /// Label override, used only when TARGET is a literal keyword
    label: Option<String>,

    /// Skip glob-matched directories that already hold at least N files
    #[arg(long, value_name = "N")]
    skip_existing: Option<usize>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let retry = RetryPolicy::default();
    let search = SearchClient::new(Arc::new(HttpFetcher::new()), retry);
    let downloader = Downloader::new(retry);

    let mut controller = BatchController::new(DatasetLayout::new(cli.output), search, downloader);
    if let Some(threshold) = cli.skip_existing {
        controller = controller.with_skip_threshold(threshold);
    }

    let summary = controller
        .run(&cli.target, cli.count, cli.label.as_deref())
        .await?;

    println!("Complete download");
    for run in summary.runs() {
        if run.skipped {
            println!("  {}: skipped, already has enough files", run.label);
        } else if run.failed.is_empty() {
            println!("  {}: {} images", run.label, run.downloaded);
        } else {
            println!(
                "  {}: {} images, could not download {} {:?}",
                run.label,
                run.downloaded,
                run.failed.len(),
                run.failed
            );
        }
    }

    Ok(())
}
