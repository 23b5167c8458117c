//! Takeoff climb surface geometry.
//!
//! Computes the diverging trapezoidal obstacle-clearance surface that extends from a
//! runway threshold along the departure bearing. Host integration (layer lookup,
//! styling, export) lives in the other workspace crates.

pub mod error;
pub mod models;
pub mod rules;
pub mod spatial;
pub mod surface;

pub use error::{GeometryError, Result};
pub use models::{
    runway_slope, DepartureBearing, Direction, Point2D, Point3D, RunwayCenterline, Surface,
    SurfaceParameters, SurfacePoints, ThresholdPoint,
};
pub use rules::{CLIMB_GRADIENT, FLARE_RATIO, SURFACE_ID, SURFACE_NAME, TERMINATION_DISTANCE_M};
pub use spatial::{normalize_bearing, planar_bearing, project, GeoPoint, LocalFrame};
pub use surface::{compute_bearing, generate, generate_from_centerline};
