//! API routes for the estate server.

pub mod error;
pub mod estates;
mod routes;

use axum::Router;

pub use error::ApiError;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
