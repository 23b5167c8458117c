//! REST API routes.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::api::surfaces;
use crate::state::AppState;

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/v1/surfaces",
            post(surfaces::create_surface).get(surfaces::list_surfaces),
        )
        .route(
            "/v1/surfaces/:id",
            get(surfaces::get_surface).delete(surfaces::delete_surface),
        )
        .route("/v1/surfaces/:id/kmz", get(surfaces::export_kmz))
}
