use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::handlers::*;

pub fn build_router(config: Config) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/score", post(score_single))
        .route("/api/score/batch", post(score_many))
        .route("/api/tier/:value", get(tier))
        .with_state(Arc::new(config))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
