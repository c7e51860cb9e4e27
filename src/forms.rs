use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};

use crate::feed::model::{FeedConfig, FormDefinition};

/// A form together with its (single) feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormRecord {
    pub form: FormDefinition,
    #[serde(default)]
    pub feed: Option<FeedConfig>,
}

/// In-memory registry of the forms this host knows about.
pub struct FormRegistry {
    forms: DashMap<u32, FormRecord>,
    next_entry_id: AtomicU64,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self {
            forms: DashMap::new(),
            next_entry_id: AtomicU64::new(1),
        }
    }

    /// Seed the registry from a JSON array of `{ "form": ..., "feed": ... }`.
    pub fn load_file(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("Unable to read {}: {e}", path.display()))?;
        let records: Vec<FormRecord> = serde_json::from_str(&raw)
            .map_err(|e| format!("Invalid forms file {}: {e}", path.display()))?;

        let registry = Self::new();
        for record in records {
            if let Some(feed) = &record.feed {
                if let Err(errors) = feed.validate(&record.form) {
                    tracing::warn!(
                        "Feed {} for form {} has an invalid field map: {}",
                        feed.id,
                        record.form.id,
                        errors.join("; ")
                    );
                }
            }
            registry.forms.insert(record.form.id, record);
        }
        Ok(registry)
    }

    pub fn get(&self, form_id: u32) -> Option<FormRecord> {
        self.forms.get(&form_id).map(|r| r.value().clone())
    }

    /// Insert or replace a form definition, keeping any existing feed.
    pub fn upsert_form(&self, form: FormDefinition) -> FormRecord {
        let mut record = self.forms.entry(form.id).or_insert_with(|| FormRecord {
            form: form.clone(),
            feed: None,
        });
        record.form = form;
        record.value().clone()
    }

    /// Attach a feed to a known form. Returns false if the form is unknown.
    pub fn set_feed(&self, feed: FeedConfig) -> bool {
        match self.forms.get_mut(&feed.form_id) {
            Some(mut record) => {
                record.feed = Some(feed);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn next_entry_id(&self) -> u64 {
        self.next_entry_id.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for FormRegistry {
    fn default() -> Self {
        Self::new()
    }
}
