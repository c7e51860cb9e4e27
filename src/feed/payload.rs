use serde::{Deserialize, Serialize};

use super::fields::lookup_field_value;
use super::model::{BASE_FIELD_COUNT, BaseFieldMap, FormDefinition, SubmissionEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Name,
    Email,
    LongText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectField {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    pub label: String,
    pub value: String,
    pub position: usize,
}

/// Body of the create-project call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
    pub referer: String,
    pub fields: Vec<ProjectField>,
}

impl ProjectPayload {
    /// Name at position 1, email at 2, then every other form field in form
    /// order. Fields mapped as base fields are not repeated.
    pub fn build(
        form: &FormDefinition,
        entry: &SubmissionEntry,
        base_fields: &BaseFieldMap,
        name: String,
        email: String,
    ) -> Self {
        let mut fields = Vec::with_capacity(BASE_FIELD_COUNT + form.fields.len());
        fields.push(ProjectField {
            kind: FieldKind::Name,
            label: "Name".to_string(),
            value: name,
            position: 1,
        });
        fields.push(ProjectField {
            kind: FieldKind::Email,
            label: "Email".to_string(),
            value: email,
            position: 2,
        });
        fields.extend(meta_fields(form, entry, base_fields));

        ProjectPayload {
            name: form.title.clone(),
            referer: entry.source_url.clone(),
            fields,
        }
    }
}

/// Remaining form fields as long-text entries, positioned after the base
/// fields.
pub fn meta_fields(
    form: &FormDefinition,
    entry: &SubmissionEntry,
    base_fields: &BaseFieldMap,
) -> Vec<ProjectField> {
    form.fields
        .iter()
        .filter(|field| !base_fields.contains(&field.key()))
        .enumerate()
        .map(|(index, field)| ProjectField {
            kind: FieldKind::LongText,
            label: field.label.clone(),
            value: lookup_field_value(form, entry, &field.key()).unwrap_or_default(),
            position: BASE_FIELD_COUNT + index + 1,
        })
        .collect()
}
