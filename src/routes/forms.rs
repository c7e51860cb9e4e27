use axum::extract::{Path, State};
use axum::Json;

use crate::auth::AdminAuth;
use crate::error::AppError;
use crate::feed::log::FeedError;
use crate::feed::model::{FeedConfig, FormDefinition};
use crate::forms::FormRecord;
use crate::state::SharedState;

pub async fn put_form(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    Path(form_id): Path<u32>,
    Json(mut form): Json<FormDefinition>,
) -> Result<Json<FormRecord>, AppError> {
    if form.title.trim().is_empty() {
        return Err(AppError::BadRequest("Form title is required".to_string()));
    }
    form.id = form_id;

    let record = state.forms.upsert_form(form);
    tracing::info!("Registered form {form_id} ({} fields)", record.form.fields.len());
    Ok(Json(record))
}

pub async fn put_feed(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    Path(form_id): Path<u32>,
    Json(mut feed): Json<FeedConfig>,
) -> Result<Json<FeedConfig>, AppError> {
    let record = state
        .forms
        .get(form_id)
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;
    feed.form_id = form_id;

    feed.validate(&record.form)
        .map_err(|errors| AppError::BadRequest(errors.join("; ")))?;

    if !state.processor.begin_pass().can_create_feed().await {
        return Err(AppError::Conflict(
            "Unable to create feed because API could not be initialized.".to_string(),
        ));
    }

    if !state.forms.set_feed(feed.clone()) {
        return Err(AppError::NotFound("Form not found".to_string()));
    }

    tracing::info!("Saved feed {} for form {form_id}", feed.id);
    Ok(Json(feed))
}

pub async fn feed_errors(
    _admin: AdminAuth,
    State(state): State<SharedState>,
    Path(form_id): Path<u32>,
) -> Result<Json<Vec<FeedError>>, AppError> {
    state
        .forms
        .get(form_id)
        .ok_or_else(|| AppError::NotFound("Form not found".to_string()))?;

    Ok(Json(state.feed_log.list_for_form(form_id)))
}
