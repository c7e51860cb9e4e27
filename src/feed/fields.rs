use regex::Regex;
use std::sync::LazyLock;

use super::model::{FormDefinition, SubmissionEntry};

static EMAIL_LOCAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~.-]+$").unwrap());

static EMAIL_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9-]+$").unwrap());

/// Resolve the submitted value for a field or input id.
///
/// An exact entry key wins. Otherwise a composite field's inputs are
/// combined: checkbox choices with `", "`, anything else with a space.
pub fn lookup_field_value(
    form: &FormDefinition,
    entry: &SubmissionEntry,
    field_id: &str,
) -> Option<String> {
    if let Some(value) = entry.values.get(field_id) {
        return Some(value.clone());
    }

    let field = form.field(field_id)?;
    if field.inputs.is_empty() || field.key() != field_id {
        return None;
    }

    let parts: Vec<&str> = field
        .inputs
        .iter()
        .filter_map(|input| entry.values.get(&input.id))
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        return None;
    }

    let separator = if field.kind == "checkbox" { ", " } else { " " };
    Some(parts.join(separator))
}

/// Well-formed email check matching the host CMS rules.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() < 6 {
        return false;
    }

    // '@' must be present and not the first character.
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !EMAIL_LOCAL_RE.is_match(local) {
        return false;
    }

    if domain.contains("..") {
        return false;
    }
    if domain.trim_matches(|c: char| c.is_whitespace() || c == '\0' || c == '.') != domain {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    labels.iter().all(|label| {
        label.trim_matches(|c: char| c.is_whitespace() || c == '\0' || c == '-') == *label
            && EMAIL_LABEL_RE.is_match(label)
    })
}
