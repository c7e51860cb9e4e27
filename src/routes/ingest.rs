use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::feed::model::SubmissionEntry;
use crate::state::SharedState;
use crate::submission::{metadata, parser, pipeline};

pub async fn submit(
    State(state): State<SharedState>,
    Path(form_id): Path<u32>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let record = state
        .forms
        .get(form_id)
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    let raw = parser::parse_body(content_type, &body).map_err(AppError::BadRequest)?;
    let (values, source_url) = parser::into_values(raw);

    let entry = SubmissionEntry {
        id: state.forms.next_entry_id(),
        form_id,
        source_url: source_url
            .or_else(|| metadata::referer(&headers))
            .unwrap_or_default(),
        values,
    };

    tracing::debug!(
        "Entry {} received for form {form_id} (user agent: {})",
        entry.id,
        metadata::user_agent(&headers)
    );

    let entry = pipeline::run(&state, &record, entry).await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "status": "received",
            "entry_id": entry.id,
        })),
    )
        .into_response())
}
