pub mod fields;
pub mod log;
pub mod model;
pub mod payload;

use std::sync::Arc;

use crate::api::{ApiSession, ClientOptions};
use crate::settings::{SettingsProvider, is_blank};

use self::fields::{is_valid_email, lookup_field_value};
use self::log::FeedErrorSink;
use self::model::{FeedConfig, FormDefinition, SubmissionEntry};
use self::payload::ProjectPayload;

pub const ERR_API_NOT_INITIALIZED: &str =
    "Unable to process feed because API could not be initialized.";
pub const ERR_INVALID_EMAIL: &str = "A valid Email address must be provided.";
pub const ERR_INVALID_NAME: &str = "A valid name must be provided.";

/// Turns form submissions into Kitchen projects.
///
/// Failures never propagate: they are recorded on the error sink and the
/// entry is handed back untouched.
pub struct FeedProcessor {
    settings: Arc<dyn SettingsProvider>,
    options: ClientOptions,
    errors: Arc<dyn FeedErrorSink>,
}

impl FeedProcessor {
    pub fn new(
        settings: Arc<dyn SettingsProvider>,
        options: ClientOptions,
        errors: Arc<dyn FeedErrorSink>,
    ) -> Self {
        Self {
            settings,
            options,
            errors,
        }
    }

    pub fn settings(&self) -> Arc<dyn SettingsProvider> {
        self.settings.clone()
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Start a processing pass. The API client is initialized at most once
    /// per pass.
    pub fn begin_pass(&self) -> FeedPass<'_> {
        FeedPass {
            processor: self,
            session: ApiSession::new(self.settings.clone(), self.options.clone()),
        }
    }

    /// Process a single feed in its own pass.
    pub async fn process(
        &self,
        feed: &FeedConfig,
        entry: SubmissionEntry,
        form: &FormDefinition,
    ) -> SubmissionEntry {
        self.begin_pass().process(feed, entry, form).await
    }
}

pub struct FeedPass<'a> {
    processor: &'a FeedProcessor,
    session: ApiSession,
}

impl FeedPass<'_> {
    /// Feeds may only be created while the API is reachable.
    pub async fn can_create_feed(&mut self) -> bool {
        self.session.ensure_client(None, None).await
    }

    pub async fn process(
        &mut self,
        feed: &FeedConfig,
        entry: SubmissionEntry,
        form: &FormDefinition,
    ) -> SubmissionEntry {
        if !feed.enabled {
            return entry;
        }

        if !self.session.ensure_client(None, None).await {
            self.log_error(ERR_API_NOT_INITIALIZED, feed, &entry, form);
            return entry;
        }
        let Some(client) = self.session.client() else {
            self.log_error(ERR_API_NOT_INITIALIZED, feed, &entry, form);
            return entry;
        };

        let name = lookup_field_value(form, &entry, &feed.base_fields.name).unwrap_or_default();
        let email = lookup_field_value(form, &entry, &feed.base_fields.email).unwrap_or_default();

        if !is_valid_email(&email) {
            self.log_error(ERR_INVALID_EMAIL, feed, &entry, form);
            return entry;
        }

        if is_blank(Some(&name)) {
            self.log_error(ERR_INVALID_NAME, feed, &entry, form);
            return entry;
        }

        let payload = ProjectPayload::build(form, &entry, &feed.base_fields, name, email);

        match client.create_project(&payload).await {
            Ok(_) => {
                tracing::info!(
                    "Created Kitchen project for entry {} (form {})",
                    entry.id,
                    form.id
                );
            }
            Err(e) => {
                let message = format!("Unable to create project: {e}");
                self.log_error(&message, feed, &entry, form);
            }
        }

        entry
    }

    fn log_error(
        &self,
        message: &str,
        feed: &FeedConfig,
        entry: &SubmissionEntry,
        form: &FormDefinition,
    ) {
        self.processor
            .errors
            .add_feed_error(message, feed, entry, form);
    }
}
