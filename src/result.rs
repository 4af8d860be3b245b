//! Run result types.

use serde::{Deserialize, Serialize};

use crate::Query;

/// One collected image URL and its download outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// 1-based position within the run.
    pub index: usize,
    /// Original image URL extracted from the search results.
    pub url: String,
    /// Whether the image file was written.
    pub downloaded: bool,
}

impl ResultEntry {
    /// Creates an entry.
    pub fn new(index: usize, url: impl Into<String>, downloaded: bool) -> Self {
        Self {
            index,
            url: url.into(),
            downloaded,
        }
    }
}

/// Outcome of one query's full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Search text that was executed.
    pub query: String,
    /// Label the output was filed under.
    pub label: String,
    /// Number of URLs collected.
    pub found: usize,
    /// Number of images written to disk.
    pub downloaded: usize,
    /// 1-based indices of entries that could not be downloaded.
    pub failed: Vec<usize>,
    /// True when the run was skipped by the existing-count rule.
    pub skipped: bool,
}

impl RunSummary {
    /// Builds a summary from the run's logged entries.
    pub fn from_entries(query: &Query, entries: &[ResultEntry]) -> Self {
        let downloaded = entries.iter().filter(|e| e.downloaded).count();
        let failed = entries
            .iter()
            .filter(|e| !e.downloaded)
            .map(|e| e.index)
            .collect();
        Self {
            query: query.text.clone(),
            label: query.label.clone(),
            found: entries.len(),
            downloaded,
            failed,
            skipped: false,
        }
    }

    /// Builds a summary for a run skipped by the existing-count rule.
    pub fn skipped(query: &Query) -> Self {
        Self {
            query: query.text.clone(),
            label: query.label.clone(),
            found: 0,
            downloaded: 0,
            failed: Vec::new(),
            skipped: true,
        }
    }
}

/// Aggregated outcome of a whole batch invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    runs: Vec<RunSummary>,
}

impl BatchSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one run's summary.
    pub fn push(&mut self, run: RunSummary) {
        self.runs.push(run);
    }

    /// Returns the per-run summaries in execution order.
    pub fn runs(&self) -> &[RunSummary] {
        &self.runs
    }

    /// Total images written across all runs.
    pub fn total_downloaded(&self) -> usize {
        self.runs.iter().map(|r| r.downloaded).sum()
    }

    /// Total download failures across all runs.
    pub fn total_failed(&self) -> usize {
        self.runs.iter().map(|r| r.failed.len()).sum()
    }

    /// Number of runs skipped by the existing-count rule.
    pub fn skipped_count(&self) -> usize {
        self.runs.iter().filter(|r| r.skipped).count()
    }
}
