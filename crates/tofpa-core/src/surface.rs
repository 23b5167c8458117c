//! Takeoff climb surface generation.
//!
//! The surface starts `clearway_length` metres beyond the threshold at `initial_width`,
//! splays out at [`FLARE_RATIO`] until it reaches `max_width`, then holds that width
//! out to [`TERMINATION_DISTANCE_M`]. Elevation climbs at [`CLIMB_GRADIENT`] from the
//! surface start. Everything here is pure and stateless.

use crate::error::{GeometryError, Result};
use crate::models::{
    DepartureBearing, Direction, Point3D, RunwayCenterline, Surface, SurfaceParameters,
    SurfacePoints, ThresholdPoint,
};
use crate::rules::{climb, flare_distance, CLIMB_GRADIENT, FLARE_RATIO, TERMINATION_DISTANCE_M};
use crate::spatial::{normalize_bearing, planar_bearing, project};

/// Departure bearing for a centerline flown in `direction`.
pub fn compute_bearing(
    centerline: &RunwayCenterline,
    direction: Direction,
) -> Result<DepartureBearing> {
    let (start, end) = centerline.endpoints(direction)?;
    let azimuth = planar_bearing(start, end);
    Ok(DepartureBearing {
        azimuth,
        back_azimuth: normalize_bearing(azimuth + 180.0),
    })
}

/// Build the surface from a threshold along `azimuth` (degrees clockwise from north).
pub fn generate(
    threshold: &ThresholdPoint,
    params: &SurfaceParameters,
    azimuth: f64,
) -> Result<Surface> {
    params.validate()?;
    if !azimuth.is_finite() {
        return Err(GeometryError::InvalidParameters(
            "azimuth must be a finite number".to_string(),
        ));
    }
    let origin = threshold.at_elevation(params.start_elevation);
    if !origin.is_finite() {
        return Err(GeometryError::InvalidParameters(
            "threshold coordinates must be finite".to_string(),
        ));
    }

    let azimuth = normalize_bearing(azimuth);
    let left = azimuth - 90.0;
    let right = azimuth + 90.0;
    let half_initial = params.initial_width / 2.0;
    let half_max = params.max_width / 2.0;

    let p1 = Point3D {
        z: params.end_elevation,
        ..project(origin, params.clearway_length, azimuth)
    };
    let p1_left = project(p1, half_initial, left);
    let p1_right = project(p1, half_initial, right);

    let flare = flare_distance(params.initial_width, params.max_width);
    let p2 = Point3D {
        z: p1.z + climb(flare),
        ..project(p1, flare, azimuth)
    };
    let p2_left = project(p2, half_max, left);
    let p2_right = project(p2, half_max, right);

    let p3 = Point3D {
        z: p1.z + climb(TERMINATION_DISTANCE_M),
        ..project(p1, TERMINATION_DISTANCE_M, azimuth)
    };
    let p3_left = project(p3, half_max, left);
    let p3_right = project(p3, half_max, right);

    tracing::debug!(
        azimuth,
        flare_distance = flare,
        flare_ratio = FLARE_RATIO,
        climb_gradient = CLIMB_GRADIENT,
        "generated takeoff climb surface"
    );

    Ok(Surface {
        azimuth,
        flare_distance: flare,
        params: *params,
        points: SurfacePoints {
            origin,
            p1,
            p1_left,
            p1_right,
            p2,
            p2_left,
            p2_right,
            p3,
            p3_left,
            p3_right,
        },
    })
}

/// Validate, derive the bearing from the centerline, then generate.
pub fn generate_from_centerline(
    centerline: &RunwayCenterline,
    threshold: &ThresholdPoint,
    params: &SurfaceParameters,
) -> Result<Surface> {
    params.validate()?;
    let bearing = compute_bearing(centerline, params.direction)?;
    generate(threshold, params, bearing.azimuth)
}
