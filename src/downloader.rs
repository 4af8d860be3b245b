//! Image download with bounded retries.

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};
use url::Url;

use crate::layout::image_file_name;
use crate::retry::{RetryOutcome, RetryPolicy};

/// User agent presented to image hosts.
const DOWNLOAD_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:47.0) Gecko/20100101 Firefox/47.0";

/// Request timeout for a single image download.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(15);

/// Downloads single images into a label's directory.
///
/// Every failure is logged and reported through the returned flag; nothing
/// propagates past [`Downloader::download`].
pub struct Downloader {
    client: Client,
    retry: RetryPolicy,
}

impl Downloader {
    /// Creates a downloader with the fixed download user agent and timeout.
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            client: Client::builder()
                .user_agent(DOWNLOAD_USER_AGENT)
                .timeout(DOWNLOAD_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            retry,
        }
    }

    /// Creates a downloader with a custom reqwest client.
    pub fn with_client(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    /// Downloads `url` as entry `index` into `dir`.
    ///
    /// Connection errors and timeouts are retried under the policy; an
    /// unparseable URL or an error status fails the entry right away.
    /// Returns whether the file was written.
    pub async fn download(&self, url: &str, index: usize, dir: &Path) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("No.{} has an invalid URL {}: {}", index, url, e);
                return false;
            }
        };

        let outcome = self
            .retry
            .run(|| {
                let client = self.client.clone();
                let target = parsed.clone();
                async move {
                    let response = client.get(target).send().await?.error_for_status()?;
                    let bytes = response.bytes().await?;
                    Ok(bytes)
                }
            })
            .await;

        let bytes = match outcome {
            RetryOutcome::Success(bytes) => bytes,
            RetryOutcome::Exhausted(e) => {
                warn!("No.{} could not be fetched after retries: {}", index, e);
                return false;
            }
            RetryOutcome::Fatal(e) => {
                warn!("No.{} could not be fetched: {}", index, e);
                return false;
            }
        };

        let path = dir.join(image_file_name(index));
        match tokio::fs::write(&path, &bytes).await {
            Ok(()) => {
                info!("No.{} saved to {}", index, path.display());
                true
            }
            Err(e) => {
                warn!("No.{} could not be written to {}: {}", index, path.display(), e);
                false
            }
        }
    }
}
