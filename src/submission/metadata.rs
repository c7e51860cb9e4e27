use axum::http::HeaderMap;

/// Page the submission came from, as reported by the browser.
pub fn referer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("referer")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn user_agent(headers: &HeaderMap) -> &str {
    headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
