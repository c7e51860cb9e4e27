use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::api::check_connection;
use crate::api::status::ConnectionReport;
use crate::auth::AdminAuth;
use crate::settings::is_valid_setting;
use crate::state::SharedState;

/// Live connectivity check for the account settings.
pub async fn check(_admin: AdminAuth, State(state): State<SharedState>) -> Json<Value> {
    let settings = state.processor.settings();
    let workspace_set = settings.workspace().is_some_and(|w| is_valid_setting(&w));
    let api_token_set = settings.api_token().is_some_and(|t| is_valid_setting(&t));

    let status = check_connection(settings, state.processor.options().clone()).await;
    let report = ConnectionReport::from(status);

    Json(json!({
        "connected": report.connected,
        "message": report.message,
        "settings": {
            "workspace": workspace_set,
            "api_token": api_token_set,
        },
    }))
}
