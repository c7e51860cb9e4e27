use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Number of base fields (name, email) that lead every project.
pub const BASE_FIELD_COUNT: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldInput {
    pub id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: u32,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Sub-inputs of composite fields such as name or checkbox.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<FieldInput>,
}

impl FormField {
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormDefinition {
    /// Find the field owning `field_id`. Input ids like `1.3` resolve to
    /// their parent field `1`.
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        let parent = field_id.split('.').next().unwrap_or(field_id);
        let parent: u32 = parent.trim().parse().ok()?;
        self.fields.iter().find(|f| f.id == parent)
    }
}

/// Values submitted for one form instance, keyed by field or input id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SubmissionEntry {
    pub id: u64,
    pub form_id: u32,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseFieldMap {
    pub name: String,
    pub email: String,
}

impl BaseFieldMap {
    pub fn ids(&self) -> [&str; BASE_FIELD_COUNT] {
        [&self.name, &self.email]
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.ids().contains(&field_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub id: u32,
    pub form_id: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub base_fields: BaseFieldMap,
}

fn default_enabled() -> bool {
    true
}

const NAME_FIELD_TYPES: &[&str] = &["name", "text", "hidden"];
const EMAIL_FIELD_TYPES: &[&str] = &["email", "hidden"];

impl FeedConfig {
    /// Check the base field map against the form: both roles are required
    /// and must point at fields of a compatible type.
    pub fn validate(&self, form: &FormDefinition) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        for (label, field_id, allowed) in [
            ("Name", self.base_fields.name.as_str(), NAME_FIELD_TYPES),
            ("Email Address", self.base_fields.email.as_str(), EMAIL_FIELD_TYPES),
        ] {
            if field_id.trim().is_empty() {
                errors.push(format!("{label} is required"));
                continue;
            }
            match form.field(field_id) {
                None => errors.push(format!("{label} is mapped to unknown field {field_id}")),
                Some(field) if !allowed.contains(&field.kind.as_str()) => errors.push(format!(
                    "{label} must be mapped to a field of type {}",
                    allowed.join(", ")
                )),
                Some(_) => {}
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
