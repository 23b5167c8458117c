//! Surface endpoints.
//!
//! A request carries the runway centerline, the threshold and the shape parameters;
//! the response is the stored layer or a precondition error.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tofpa_core::{
    generate_from_centerline, runway_slope, LocalFrame, Point2D, RunwayCenterline,
    SurfaceParameters, ThresholdPoint,
};
use tofpa_export::{to_kmz, Placemark, KMZ_CONTENT_TYPE};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::state::{AppState, GeoOrigin, SurfaceLayer};

pub const DEFAULT_LAYER_NAME: &str = "RWY_TOFPA_AOC_TypeA";

#[derive(Debug, Deserialize)]
pub struct CreateSurfaceRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub centerline: RunwayCenterline,
    pub threshold: ThresholdPoint,
    #[serde(default)]
    pub params: SurfaceParameters,
    /// Geographic position of the threshold, used for export.
    #[serde(default)]
    pub origin: Option<GeoOrigin>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KmzQuery {
    pub origin_lat: Option<f64>,
    pub origin_lon: Option<f64>,
}

/// Compute a surface and store it as a new layer.
pub async fn create_surface(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateSurfaceRequest>,
) -> Result<(StatusCode, Json<SurfaceLayer>), ApiError> {
    if let Some(origin) = req.origin {
        let anchor = Point2D::new(req.threshold.x, req.threshold.y);
        LocalFrame::checked_anchored(origin.lat, origin.lon, anchor)?;
    }
    let surface = generate_from_centerline(&req.centerline, &req.threshold, &req.params)?;

    let runway_length_m = req.centerline.length();
    let layer = SurfaceLayer {
        id: Uuid::new_v4(),
        name: req
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LAYER_NAME.to_string()),
        created_at: Utc::now(),
        runway_length_m,
        runway_slope: runway_slope(
            req.params.start_elevation,
            req.params.end_elevation,
            runway_length_m,
        ),
        origin: req.origin,
        back_azimuth: surface.back_azimuth(),
        ring: surface.closed_ring(),
        surface,
        sequence: state.next_sequence(),
    };

    tracing::info!(
        "Created surface layer '{}' ({}) at azimuth {:.3}",
        layer.name,
        layer.id,
        layer.surface.azimuth
    );
    state.insert_layer(layer.clone());

    Ok((StatusCode::CREATED, Json(layer)))
}

/// List stored layers, oldest first.
pub async fn list_surfaces(State(state): State<Arc<AppState>>) -> Json<Vec<SurfaceLayer>> {
    Json(state.list_layers())
}

pub async fn get_surface(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SurfaceLayer>, ApiError> {
    state
        .get_layer(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))
}

pub async fn delete_surface(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if state.remove_layer(&id) {
        tracing::info!("Deleted surface layer {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id.to_string()))
    }
}

/// Download a layer as KMZ. The threshold is pinned to the query origin, else the
/// layer's own origin, else the configured default.
pub async fn export_kmz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Query(query): Query<KmzQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let layer = state
        .get_layer(&id)
        .ok_or_else(|| ApiError::NotFound(id.to_string()))?;

    let query_origin = query
        .origin_lat
        .zip(query.origin_lon)
        .map(|(lat, lon)| GeoOrigin { lat, lon });
    let origin = query_origin
        .or(layer.origin)
        .or(state.config().default_origin)
        .ok_or(ApiError::MissingOrigin)?;

    let anchor = layer.surface.points.origin.horizontal();
    let frame = LocalFrame::checked_anchored(origin.lat, origin.lon, anchor)?;
    let placemark = Placemark::from_surface(&layer.surface, &frame)?;
    let bytes = to_kmz(&placemark)?;

    let disposition = format!("attachment; filename=\"{}.kmz\"", file_stem(&layer.name));
    Ok((
        [
            (header::CONTENT_TYPE, KMZ_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        DEFAULT_LAYER_NAME.to_string()
    } else {
        stem
    }
}

#[cfg(test)]
mod file_stem_tests {
    use super::file_stem;

    #[test]
    fn unsafe_characters_are_replaced() {
        assert_eq!(file_stem("RWY 09/27 \"A\""), "RWY_09_27__A_");
        assert_eq!(file_stem(""), "RWY_TOFPA_AOC_TypeA");
    }
}
