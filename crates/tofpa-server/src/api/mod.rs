//! API routes for the surface server.

pub mod error;
mod routes;
pub mod surfaces;

use axum::Router;

pub fn routes() -> Router<std::sync::Arc<crate::state::AppState>> {
    routes::create_router()
}
