//! Fixed geometry of the Type A takeoff climb surface.
//!
//! These values encode the regulatory surface shape and are not tunable per call.

/// Lateral growth of the half-width per metre travelled forward (~14.25° half-angle splay).
pub const FLARE_RATIO: f64 = 0.125;

/// Elevation gained per metre travelled forward (1.2%).
pub const CLIMB_GRADIENT: f64 = 0.012;

/// Distance from the surface start to its far edge, in metres.
pub const TERMINATION_DISTANCE_M: f64 = 10_000.0;

/// Feature name attached to every generated surface.
pub const SURFACE_NAME: &str = "TOFPA AOC Type A";

/// Feature id attached to every generated surface.
pub const SURFACE_ID: u32 = 13;

/// Forward distance needed to flare from `initial_width` to `max_width`.
pub fn flare_distance(initial_width: f64, max_width: f64) -> f64 {
    (max_width / 2.0 - initial_width / 2.0) / FLARE_RATIO
}

/// Height gained over `distance` metres along the surface.
pub fn climb(distance: f64) -> f64 {
    distance * CLIMB_GRADIENT
}
