//! # Routes
//!
//! Axum router configuration for the checkout acceptance API.

use crate::handlers;
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
/// - GET  /health - Health check (also served at /)
/// - POST /checkout - Validate and accept a checkout request
pub fn create_router() -> Router {
    // CORS configuration - allow all origins for now
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Checkout acceptance gate
        .route("/checkout", post(handlers::checkout))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
