//! Paged image-URL collection for one keyword.

use std::sync::Arc;

use scraper::{Html, Selector};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::fetcher::PageFetcher;
use crate::page::{PageQuerySource, SEARCH_ENDPOINT};
use crate::retry::{RetryOutcome, RetryPolicy};
use crate::{HarvestError, Result};

/// Consecutive failed pages after which a search gives up.
const MAX_FAILED_PAGES: u32 = 5;

/// CSS selector matching the per-result metadata blocks.
const RESULT_SELECTOR: &str = ".rg_meta.notranslate";

/// Per-result metadata embedded in the page. Only the original-image URL
/// is read; everything else in the object is ignored.
#[derive(Debug, Deserialize)]
struct ImageMeta {
    #[serde(rename = "ou")]
    original_url: String,
}

/// Collects image URLs for a keyword by walking result pages in order.
pub struct SearchClient {
    fetcher: Arc<dyn PageFetcher>,
    retry: RetryPolicy,
    endpoint: String,
}

impl SearchClient {
    /// Creates a client over the given fetcher and retry policy.
    pub fn new(fetcher: Arc<dyn PageFetcher>, retry: RetryPolicy) -> Self {
        Self {
            fetcher,
            retry,
            endpoint: SEARCH_ENDPOINT.to_string(),
        }
    }

    /// Overrides the search endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Collects up to `maximum` image URLs for `keyword`.
    ///
    /// Pages are visited in order starting at page 0, each fetched under
    /// the retry policy. A page that still fails after its attempt budget
    /// is skipped and the next page index is tried; a page with no results
    /// ends the search. The result can be shorter than `maximum` when the
    /// engine runs out of results or too many consecutive pages fail.
    pub async fn collect(&self, keyword: &str, maximum: usize) -> Vec<String> {
        let mut urls: Vec<String> = Vec::new();
        if maximum == 0 {
            return urls;
        }

        let mut consecutive_failures = 0;
        let source = PageQuerySource::new(keyword).with_endpoint(self.endpoint.clone());

        for request in source {
            let page_url = request.url();
            let outcome = self
                .retry
                .run(|| {
                    let fetcher = Arc::clone(&self.fetcher);
                    let page_url = page_url.clone();
                    async move {
                        let html = fetcher.fetch(&page_url).await?;
                        extract_urls(&html)
                    }
                })
                .await;

            match outcome {
                RetryOutcome::Success(page_urls) => {
                    consecutive_failures = 0;
                    if page_urls.is_empty() {
                        info!("No results on page {}, stopping", request.page);
                        break;
                    }
                    debug!("Page {} yielded {} URLs", request.page, page_urls.len());
                    let remaining = maximum - urls.len();
                    urls.extend(page_urls.into_iter().take(remaining));
                    if urls.len() >= maximum {
                        break;
                    }
                }
                RetryOutcome::Exhausted(e) => {
                    consecutive_failures += 1;
                    warn!(
                        "Page {} failed after retries: {}, skipping",
                        request.page, e
                    );
                }
                RetryOutcome::Fatal(e) => {
                    consecutive_failures += 1;
                    warn!("Page {} failed: {}, skipping", request.page, e);
                }
            }

            if consecutive_failures >= MAX_FAILED_PAGES {
                warn!(
                    "{} consecutive pages failed, stopping with {} URLs",
                    consecutive_failures,
                    urls.len()
                );
                break;
            }
        }

        urls
    }
}

/// Extracts original-image URLs from one result page.
///
/// A malformed metadata block fails the whole page.
fn extract_urls(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(RESULT_SELECTOR)
        .map_err(|e| HarvestError::Parse(format!("Failed to parse selector: {:?}", e)))?;

    let mut urls = Vec::new();
    for element in document.select(&selector) {
        let raw = element.text().collect::<String>();
        let meta: ImageMeta = serde_json::from_str(&raw)
            .map_err(|e| HarvestError::Parse(format!("Invalid result metadata: {}", e)))?;
        urls.push(meta.original_url);
    }
    Ok(urls)
}
