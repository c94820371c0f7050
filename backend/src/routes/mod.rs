//! Route definitions for the Crop Advisor backend

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::health_check))
        // Recommendation proxy
        .route("/recommend", post(handlers::recommend))
}
