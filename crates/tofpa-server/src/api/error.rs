//! Mapping of service failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tofpa_core::GeometryError;
use tofpa_export::ExportError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("surface {0} not found")]
    NotFound(String),

    #[error("no geographic origin for export; pass origin_lat and origin_lon")]
    MissingOrigin,

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Geometry(GeometryError::InvalidOrigin(_)) => StatusCode::BAD_REQUEST,
            Self::Geometry(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MissingOrigin => StatusCode::BAD_REQUEST,
            Self::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Geometry(err) => err.kind(),
            Self::NotFound(_) => "not_found",
            Self::MissingOrigin => "missing_origin",
            Self::Export(_) => "export_failed",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("Rejected request: {}", self);
        }
        (
            status,
            Json(json!({
                "error": status.canonical_reason().unwrap_or("Error"),
                "kind": self.kind(),
                "message": self.to_string(),
            })),
        )
            .into_response()
    }
}
