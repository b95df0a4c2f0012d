//! # Routes
//!
//! Axum router configuration for the checkout API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /create-checkout-session - Create a hosted checkout session
/// - GET  /health - Health check
pub fn create_router(state: AppState) -> Router {
    // Storefronts call the checkout endpoint cross-origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .route(
            "/create-checkout-session",
            post(handlers::create_checkout_session),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
