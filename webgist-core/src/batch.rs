//! Batch coordination over many URLs.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::summarizer::{Summarizer, SummaryResult};

/// Ordered mapping from URL to its [`SummaryResult`].
///
/// Iteration order matches input order. Duplicate input URLs are each
/// processed independently; the mapping keeps one entry per distinct URL at
/// its first occurrence's position, holding the last occurrence's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    entries: Vec<SummaryResult>,
}

impl BatchResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up the result for a URL.
    pub fn get(&self, url: &str) -> Option<&SummaryResult> {
        self.entries.iter().find(|entry| entry.url == url)
    }

    /// Results in input order.
    pub fn iter(&self) -> impl Iterator<Item = &SummaryResult> {
        self.entries.iter()
    }

    fn insert(&mut self, result: SummaryResult) {
        match self.entries.iter_mut().find(|entry| entry.url == result.url) {
            Some(existing) => *existing = result,
            None => self.entries.push(result),
        }
    }
}

impl IntoIterator for BatchResult {
    type Item = SummaryResult;
    type IntoIter = std::vec::IntoIter<SummaryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a SummaryResult;
    type IntoIter = std::slice::Iter<'a, SummaryResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Summarizer {
    /// Summarize many URLs with bounded concurrency.
    ///
    /// One URL's failure never aborts the others: every per-URL error is
    /// captured inside that URL's entry, so callers can partially consume the
    /// result. `buffered` both bounds in-flight pipelines (protecting the
    /// shared local backend) and yields completions in input order.
    pub async fn batch_summarize<S: AsRef<str>>(&self, urls: &[S]) -> BatchResult {
        let limit = self.config.max_concurrency.max(1);
        tracing::info!(urls = urls.len(), limit, "batch.start");

        let results: Vec<SummaryResult> = stream::iter(urls.iter().map(|u| u.as_ref()))
            .map(|url| self.summarize(url))
            .buffered(limit)
            .collect()
            .await;

        let mut batch = BatchResult::default();
        for result in results {
            batch.insert(result);
        }

        let failed = batch.iter().filter(|entry| !entry.is_success()).count();
        tracing::info!(entries = batch.len(), failed, "batch.done");
        batch
    }
}
