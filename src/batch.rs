//! Batch expansion and sequential pipeline execution.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::downloader::Downloader;
use crate::layout::DatasetLayout;
use crate::result::{BatchSummary, ResultEntry, RunSummary};
use crate::run_log::RunLogger;
use crate::search::SearchClient;
use crate::{HarvestError, Query, Result};

/// One resolved query and whether the existing-count rule skips it.
struct Planned {
    query: Query,
    skip: bool,
}

/// Expands a target argument into queries and runs the pipeline for each.
///
/// Queries run strictly one after another. A failing query is logged and
/// summarised; it never stops the rest of the batch.
pub struct BatchController {
    layout: DatasetLayout,
    search: SearchClient,
    downloader: Downloader,
    skip_threshold: Option<usize>,
}

impl BatchController {
    /// Creates a controller over the given layout and pipeline components.
    pub fn new(layout: DatasetLayout, search: SearchClient, downloader: Downloader) -> Self {
        Self {
            layout,
            search,
            downloader,
            skip_threshold: None,
        }
    }

    /// Skips glob-matched directories already holding at least `count` files.
    pub fn with_skip_threshold(mut self, count: usize) -> Self {
        self.skip_threshold = Some(count);
        self
    }

    /// Expands `target` and runs the pipeline for every resolved query.
    ///
    /// `target` is tried as a query file first, then as a directory glob
    /// (when its parent directory exists), and otherwise used as a literal
    /// keyword. `label` applies to the literal form only. Labels must be
    /// unique across the batch; a duplicate fails the whole batch before
    /// any query runs.
    pub async fn run(
        &self,
        target: &str,
        maximum: usize,
        label: Option<&str>,
    ) -> Result<BatchSummary> {
        let planned = self.resolve(target, label)?;
        ensure_unique_labels(&planned)?;
        info!(
            "Batch resolved to {} queries ({} skipped)",
            planned.len(),
            planned.iter().filter(|p| p.skip).count()
        );

        let mut summary = BatchSummary::new();
        for plan in &planned {
            if plan.skip {
                info!(
                    "Skipping '{}': directory already has enough files",
                    plan.query.label
                );
                summary.push(RunSummary::skipped(&plan.query));
            } else {
                summary.push(self.run_query(&plan.query, maximum).await);
            }
        }
        Ok(summary)
    }

    /// Resolves the target argument into the batch's query list.
    fn resolve(&self, target: &str, label: Option<&str>) -> Result<Vec<Planned>> {
        let path = Path::new(target);

        if path.is_file() {
            let content = fs::read_to_string(path)?;
            return Ok(content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| Planned {
                    query: Query::from_text(line),
                    skip: false,
                })
                .collect());
        }

        if path.parent().map_or(false, |parent| parent.is_dir()) {
            return self.resolve_glob(target);
        }

        let query = match label {
            Some(label) => Query::with_label(target, label),
            None => Query::from_text(target),
        };
        Ok(vec![Planned { query, skip: false }])
    }

    /// Expands a directory glob; non-directories are ignored.
    fn resolve_glob(&self, pattern: &str) -> Result<Vec<Planned>> {
        let mut planned = Vec::new();
        for entry in glob::glob(pattern)? {
            let path = entry?;
            if !path.is_dir() {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                let skip = match self.skip_threshold {
                    Some(threshold) => count_files(&path)? >= threshold,
                    None => false,
                };
                planned.push(Planned {
                    query: Query::from_dir_name(name),
                    skip,
                });
            }
        }
        Ok(planned)
    }

    /// Runs search, download and logging for one query.
    async fn run_query(&self, query: &Query, maximum: usize) -> RunSummary {
        info!("Collecting up to {} images for '{}'", maximum, query.text);
        if let Err(e) = self.layout.prepare(&query.label) {
            error!("Could not prepare directories for '{}': {}", query.label, e);
            return RunSummary::from_entries(query, &[]);
        }

        let urls = self.search.collect(&query.text, maximum).await;
        info!("Found {} image URLs for '{}'", urls.len(), query.text);

        let dir = self.layout.label_dir(&query.label);
        let mut entries = Vec::with_capacity(urls.len());
        for (i, url) in urls.iter().enumerate() {
            let index = i + 1;
            let downloaded = self.downloader.download(url, index, &dir).await;
            entries.push(ResultEntry::new(index, url.clone(), downloaded));
        }

        let logger = RunLogger::new(self.layout.csv_path(&query.label));
        if let Err(e) = logger.write(&entries) {
            error!("Could not write run log for '{}': {}", query.label, e);
        }

        let summary = RunSummary::from_entries(query, &entries);
        info!(
            "Finished '{}': {} downloaded, {} failed",
            summary.label,
            summary.downloaded,
            summary.failed.len()
        );
        summary
    }
}

/// Counts direct child files of a directory.
fn count_files(dir: &Path) -> Result<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            count += 1;
        }
    }
    Ok(count)
}

/// Rejects batches where two runnable queries share a label.
fn ensure_unique_labels(planned: &[Planned]) -> Result<()> {
    let mut seen = HashSet::new();
    for plan in planned.iter().filter(|p| !p.skip) {
        if !seen.insert(plan.query.label.as_str()) {
            return Err(HarvestError::DuplicateLabel(plan.query.label.clone()));
        }
    }
    Ok(())
}
