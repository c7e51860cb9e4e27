pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod feed;
pub mod forms;
pub mod routes;
pub mod settings;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::feed::log::FeedErrorLog;
use crate::feed::FeedProcessor;
use crate::forms::FormRegistry;
use crate::settings::SettingsProvider;
use crate::state::{AppState, SharedState};

pub fn build_app(
    config: Config,
    settings: Arc<dyn SettingsProvider>,
    forms: FormRegistry,
) -> (Router, SharedState) {
    let feed_log = Arc::new(FeedErrorLog::new());
    let processor = FeedProcessor::new(settings, config.client_options(), feed_log.clone());
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        config,
        processor,
        feed_log,
        forms,
    });

    let app = Router::new()
        .merge(routes::api_routes())
        .merge(routes::ingest_routes())
        .route("/health", axum::routing::get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                )),
        )
        .with_state(state.clone());

    (app, state)
}

async fn health() -> &'static str {
    "ok"
}
