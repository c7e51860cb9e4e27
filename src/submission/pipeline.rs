use crate::feed::model::SubmissionEntry;
use crate::forms::FormRecord;
use crate::state::SharedState;

/// Run the form's feed against a new entry. The outcome is only visible in
/// the feed error log; the entry comes back unchanged.
pub async fn run(
    state: &SharedState,
    record: &FormRecord,
    entry: SubmissionEntry,
) -> SubmissionEntry {
    let Some(feed) = &record.feed else {
        tracing::debug!("Form {} has no feed configured", record.form.id);
        return entry;
    };

    let mut pass = state.processor.begin_pass();
    pass.process(feed, entry, &record.form).await
}
