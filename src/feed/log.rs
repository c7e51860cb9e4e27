use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

use super::model::{FeedConfig, FormDefinition, SubmissionEntry};

/// Receiver of feed-level processing errors.
pub trait FeedErrorSink: Send + Sync {
    fn add_feed_error(
        &self,
        message: &str,
        feed: &FeedConfig,
        entry: &SubmissionEntry,
        form: &FormDefinition,
    );
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedError {
    pub feed_id: u32,
    pub form_id: u32,
    pub entry_id: u64,
    pub message: String,
    pub logged_at: DateTime<Utc>,
}

/// Append-only in-memory feed error log, grouped per form.
pub struct FeedErrorLog {
    entries: DashMap<u32, Vec<FeedError>>,
}

impl FeedErrorLog {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Errors logged for a form, oldest first.
    pub fn list_for_form(&self, form_id: u32) -> Vec<FeedError> {
        self.entries
            .get(&form_id)
            .map(|errors| errors.value().clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for FeedErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedErrorSink for FeedErrorLog {
    fn add_feed_error(
        &self,
        message: &str,
        feed: &FeedConfig,
        entry: &SubmissionEntry,
        form: &FormDefinition,
    ) {
        tracing::error!(
            "Feed {} failed for entry {} (form {}): {message}",
            feed.id,
            entry.id,
            form.id
        );

        self.entries.entry(form.id).or_default().push(FeedError {
            feed_id: feed.id,
            form_id: form.id,
            entry_id: entry.id,
            message: message.to_string(),
            logged_at: Utc::now(),
        });
    }
}
