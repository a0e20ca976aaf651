pub mod config;
pub mod crypto;
pub mod error;
pub mod extractor;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::SurveyStore;

pub fn build_app(config: Config) -> Router {
    let store = SurveyStore::new(config.store_path.clone());
    tracing::info!("Appending submissions to {}", store.path().display());

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState { store });

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::api_routes())
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}
