//! Precondition failures raised by the surface generator.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Fewer than two vertices, or an endpoint pair that defines no direction.
    #[error("invalid centerline: {0}")]
    InvalidCenterline(String),

    #[error("invalid surface parameters: {0}")]
    InvalidParameters(String),

    /// Geographic anchor outside latitude/longitude range.
    #[error("invalid geographic origin: {0}")]
    InvalidOrigin(String),
}

impl GeometryError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCenterline(_) => "invalid_centerline",
            Self::InvalidParameters(_) => "invalid_parameters",
            Self::InvalidOrigin(_) => "invalid_origin",
        }
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
