use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Body key that carries the page the form was submitted from.
pub const SOURCE_URL_KEY: &str = "source_url";

/// Parse a request body based on Content-Type header.
pub fn parse_body(content_type: Option<&str>, body: &[u8]) -> Result<Map<String, Value>, String> {
    let ct = content_type.unwrap_or("application/json");

    let value: Value = if ct.contains("application/json") {
        serde_json::from_slice(body).map_err(|e| format!("Invalid JSON: {e}"))?
    } else if ct.contains("application/x-www-form-urlencoded") {
        parse_form_urlencoded(body)?
    } else {
        // Try JSON first, then form-urlencoded
        serde_json::from_slice(body)
            .or_else(|_| parse_form_urlencoded(body))
            .map_err(|e| format!("Unable to parse body: {e}"))?
    };

    match value {
        Value::Object(map) => Ok(map),
        _ => Err("Submission must be an object of field values".to_string()),
    }
}

fn parse_form_urlencoded(body: &[u8]) -> Result<Value, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut map = Map::new();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        map.insert(k.into_owned(), Value::String(v.into_owned()));
    }
    Ok(Value::Object(map))
}

/// Flatten parsed fields into entry values keyed by field id, pulling out
/// the source URL if the body carries one.
pub fn into_values(mut raw: Map<String, Value>) -> (BTreeMap<String, String>, Option<String>) {
    let source_url = raw
        .remove(SOURCE_URL_KEY)
        .and_then(|v| v.as_str().map(str::to_string))
        .filter(|s| !s.is_empty());

    let values = raw
        .into_iter()
        .filter_map(|(key, value)| flatten(&value).map(|v| (key, v)))
        .collect();

    (values, source_url)
}

fn flatten(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(flatten)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}
