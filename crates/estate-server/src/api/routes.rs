//! REST API routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::estates;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/estate", post(estates::create_estate))
        .route("/estate/:id/tree", post(estates::create_tree))
        .route("/estate/:id/stats", get(estates::get_stats))
        .route("/estate/:id/drone-plan", get(estates::get_drone_plan))
        .route("/health", get(|| async { "OK" }))
}
