//! Core data models for the takeoff climb surface.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::rules::{flare_distance, TERMINATION_DISTANCE_M};

/// Horizontal position in a planar projected coordinate system (metres, x east, y north).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Planar position with an elevation in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn horizontal(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Which end of the centerline is the departure end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Depart along first vertex -> last vertex.
    #[default]
    FromStart,
    /// Depart along last vertex -> first vertex.
    FromEnd,
}

impl Direction {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "from_start" | "start" | "start_to_end" => Some(Self::FromStart),
            "from_end" | "end" | "end_to_start" => Some(Self::FromEnd),
            _ => None,
        }
    }
}

/// Runway ground track. Only the first and last vertices drive the bearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunwayCenterline {
    pub vertices: Vec<Point2D>,
}

impl RunwayCenterline {
    pub fn new(vertices: Vec<Point2D>) -> Self {
        Self { vertices }
    }

    /// Departure endpoints `(start, end)` for the given direction.
    pub fn endpoints(&self, direction: Direction) -> Result<(Point2D, Point2D)> {
        if self.vertices.len() < 2 {
            return Err(GeometryError::InvalidCenterline(format!(
                "expected at least 2 vertices, got {}",
                self.vertices.len()
            )));
        }
        let (Some(&first), Some(&last)) = (self.vertices.first(), self.vertices.last()) else {
            return Err(GeometryError::InvalidCenterline(
                "centerline has no vertices".to_string(),
            ));
        };
        if !(first.x.is_finite() && first.y.is_finite() && last.x.is_finite() && last.y.is_finite())
        {
            return Err(GeometryError::InvalidCenterline(
                "endpoint coordinates must be finite".to_string(),
            ));
        }
        if first == last {
            return Err(GeometryError::InvalidCenterline(
                "first and last vertices coincide; bearing is undefined".to_string(),
            ));
        }

        Ok(match direction {
            Direction::FromStart => (first, last),
            Direction::FromEnd => (last, first),
        })
    }

    /// Ground track length along every segment.
    pub fn length(&self) -> f64 {
        self.vertices
            .windows(2)
            .map(|pair| (pair[1].x - pair[0].x).hypot(pair[1].y - pair[0].y))
            .sum()
    }
}

/// Longitudinal runway slope between the two end elevations; zero for a degenerate runway.
pub fn runway_slope(start_elevation: f64, end_elevation: f64, length: f64) -> f64 {
    if length > 0.0 {
        (start_elevation - end_elevation) / length
    } else {
        0.0
    }
}

/// Runway end the surface originates from. Its elevation is supplied by the parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdPoint {
    pub x: f64,
    pub y: f64,
}

impl ThresholdPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn at_elevation(&self, z: f64) -> Point3D {
        Point3D::new(self.x, self.y, z)
    }
}

/// Shape inputs for a single surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParameters {
    /// Width at the surface start, centred on the extended centerline.
    pub initial_width: f64,
    /// Width the surface flares to and then holds.
    pub max_width: f64,
    /// Forward offset from the threshold before the surface begins.
    pub clearway_length: f64,
    /// Elevation at the threshold.
    pub start_elevation: f64,
    /// Elevation at the surface start.
    pub end_elevation: f64,
    pub direction: Direction,
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self {
            initial_width: 180.0,
            max_width: 1800.0,
            clearway_length: 0.0,
            start_elevation: 0.0,
            end_elevation: 0.0,
            direction: Direction::FromStart,
        }
    }
}

impl SurfaceParameters {
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("initial_width", self.initial_width),
            ("max_width", self.max_width),
            ("clearway_length", self.clearway_length),
            ("start_elevation", self.start_elevation),
            ("end_elevation", self.end_elevation),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(GeometryError::InvalidParameters(format!(
                "{name} must be a finite number"
            )));
        }
        if self.initial_width <= 0.0 {
            return Err(GeometryError::InvalidParameters(format!(
                "initial_width must be positive, got {}",
                self.initial_width
            )));
        }
        if self.max_width <= 0.0 {
            return Err(GeometryError::InvalidParameters(format!(
                "max_width must be positive, got {}",
                self.max_width
            )));
        }
        if self.max_width < self.initial_width {
            return Err(GeometryError::InvalidParameters(format!(
                "max_width ({}) is smaller than initial_width ({})",
                self.max_width, self.initial_width
            )));
        }
        if self.clearway_length < 0.0 {
            return Err(GeometryError::InvalidParameters(format!(
                "clearway_length must not be negative, got {}",
                self.clearway_length
            )));
        }
        // the flare has to finish before the far edge or the ring folds over itself
        let flare = flare_distance(self.initial_width, self.max_width);
        if flare > TERMINATION_DISTANCE_M {
            return Err(GeometryError::InvalidParameters(format!(
                "flare distance ({flare} m) exceeds the {TERMINATION_DISTANCE_M} m surface length"
            )));
        }
        Ok(())
    }
}

/// Departure bearing and its reverse, degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepartureBearing {
    pub azimuth: f64,
    pub back_azimuth: f64,
}

/// Every intermediate point of a surface computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoints {
    /// Threshold at the start elevation.
    pub origin: Point3D,
    /// Surface start centerpoint.
    pub p1: Point3D,
    pub p1_left: Point3D,
    pub p1_right: Point3D,
    /// End of the flare.
    pub p2: Point3D,
    pub p2_left: Point3D,
    pub p2_right: Point3D,
    /// Far edge of the surface.
    pub p3: Point3D,
    pub p3_left: Point3D,
    pub p3_right: Point3D,
}

/// A generated takeoff climb surface. Owned by the caller; carries no link back to the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub azimuth: f64,
    pub flare_distance: f64,
    pub params: SurfaceParameters,
    pub points: SurfacePoints,
}

impl Surface {
    pub fn back_azimuth(&self) -> f64 {
        crate::spatial::normalize_bearing(self.azimuth + 180.0)
    }

    /// The six polygon vertices in winding order, ring left open.
    pub fn ring(&self) -> [Point3D; 6] {
        let p = &self.points;
        [
            p.p3_right, p.p3_left, p.p2_left, p.p1_left, p.p1_right, p.p2_right,
        ]
    }

    /// The ring with its first vertex repeated at the end.
    pub fn closed_ring(&self) -> Vec<Point3D> {
        let ring = self.ring();
        let mut closed = ring.to_vec();
        closed.push(ring[0]);
        closed
    }
}
