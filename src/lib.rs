//! # imgharvest
//!
//! Builds labeled image datasets from web image search.
//!
//! A batch target (a literal keyword, a query file, or a directory glob)
//! expands into (query, label) pairs. For each pair the library walks the
//! engine's result pages, extracts the original-image URLs embedded in the
//! markup, downloads every candidate with bounded retries, and records a
//! per-query CSV audit log:
//!
//! ```text
//! <root>/images/<label>/0001.jpg ...
//! <root>/urls/<label>.csv
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use imgharvest::{
//!     BatchController, DatasetLayout, Downloader, HttpFetcher, RetryPolicy, SearchClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let retry = RetryPolicy::default();
//!     let search = SearchClient::new(Arc::new(HttpFetcher::new()), retry);
//!     let downloader = Downloader::new(retry);
//!     let controller = BatchController::new(DatasetLayout::new("dataset"), search, downloader);
//!
//!     let summary = controller.run("shiba inu", 100, None).await?;
//!     println!("downloaded {} images", summary.total_downloaded());
//!     Ok(())
//! }
//! ```

mod batch;
mod downloader;
mod error;
mod fetcher;
mod fetcher_http;
mod layout;
mod page;
mod query;
mod result;
mod retry;
mod run_log;
mod search;

pub use batch::BatchController;
pub use downloader::Downloader;
pub use error::{HarvestError, Result};
pub use fetcher::PageFetcher;
pub use fetcher_http::HttpFetcher;
pub use layout::{image_file_name, DatasetLayout};
pub use page::{PageQuerySource, PageRequest, SEARCH_ENDPOINT};
pub use query::Query;
pub use result::{BatchSummary, ResultEntry, RunSummary};
pub use retry::{RetryOutcome, RetryPolicy};
pub use run_log::RunLogger;
pub use search::SearchClient;
