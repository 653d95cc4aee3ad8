//! Decomp API - REST server
//!
//! HTTP endpoints over the decomposition engine. The service only adapts
//! JSON to the engine call: persistence, authentication, and the linguistic
//! annotation step all belong to external collaborators.

pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use state::AppState;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/v1/decompose", post(handlers::decompose))
        .layer(TraceLayer::new_for_http());

    if state.config.server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

/// Router over default state, for integration tests
pub fn create_router_for_testing() -> Router {
    create_router(Arc::new(AppState::default()))
}
