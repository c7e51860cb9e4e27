pub mod connection;
pub mod forms;
pub mod ingest;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/connection", get(connection::check))
        .route("/api/v1/forms/{form_id}", put(forms::put_form))
        .route("/api/v1/forms/{form_id}/feed", put(forms::put_feed))
        .route("/api/v1/forms/{form_id}/feed-errors", get(forms::feed_errors))
}

pub fn ingest_routes() -> Router<SharedState> {
    Router::new().route("/v1/forms/{form_id}/submissions", post(ingest::submit))
}
