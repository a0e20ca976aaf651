pub mod health;
pub mod survey;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::state::SharedState;

/// Versioned API. Every route here allows cross-origin requests from anywhere.
pub fn api_routes() -> Router<SharedState> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/survey", post(survey::submit))
        .layer(cors)
}

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/ping", get(health::ping))
}
