//! Planar bearing math and local georeferencing.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::models::{Point2D, Point3D};

/// Wrap a bearing in degrees into [0, 360).
pub fn normalize_bearing(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Planar bearing from `from` to `to`, degrees clockwise from north (+y).
pub fn planar_bearing(from: Point2D, to: Point2D) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    normalize_bearing(dx.atan2(dy).to_degrees())
}

/// Move `point` by `distance` along `bearing_deg` in the plane. Elevation is carried over unchanged.
pub fn project(point: Point3D, distance: f64, bearing_deg: f64) -> Point3D {
    let bearing_rad = bearing_deg.to_radians();
    Point3D {
        x: point.x + distance * bearing_rad.sin(),
        y: point.y + distance * bearing_rad.cos(),
        z: point.z,
    }
}

pub fn horizontal_distance(a: Point2D, b: Point2D) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Smallest absolute angle between two bearings, in [0, 180].
pub fn bearing_difference(a: f64, b: f64) -> f64 {
    let diff = normalize_bearing(a - b);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

// ==== ENU (East-North-Up) Coordinate Conversion ====
// These functions convert between meters and degrees using latitude-aware scaling.

/// Meters per degree of latitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lat(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_132.954 - 559.822 * (2.0 * lat_rad).cos() + 1.175 * (4.0 * lat_rad).cos()
        - 0.0023 * (6.0 * lat_rad).cos()
}

/// Meters per degree of longitude at a given latitude (WGS84 approximation).
pub fn meters_per_deg_lon(lat_deg: f64) -> f64 {
    let lat_rad = lat_deg.to_radians();
    111_412.84 * lat_rad.cos() - 93.5 * (3.0 * lat_rad).cos() + 0.118 * (5.0 * lat_rad).cos()
}

pub fn meters_to_lat(meters: f64, ref_lat_deg: f64) -> f64 {
    meters / meters_per_deg_lat(ref_lat_deg).max(1e-9)
}

pub fn meters_to_lon(meters: f64, ref_lat_deg: f64) -> f64 {
    meters / meters_per_deg_lon(ref_lat_deg).max(1e-9)
}

/// Geographic position, degrees and metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
}

/// Tangent-plane frame tying a planar anchor to a geographic position.
///
/// Adequate over the ~10 km extent of a climb surface; not a general CRS transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalFrame {
    pub origin_lat: f64,
    pub origin_lon: f64,
    #[serde(default)]
    pub anchor_x: f64,
    #[serde(default)]
    pub anchor_y: f64,
}

impl LocalFrame {
    /// Frame whose planar origin (0, 0) sits at `(lat, lon)`.
    pub fn new(origin_lat: f64, origin_lon: f64) -> Self {
        Self::anchored(origin_lat, origin_lon, Point2D::new(0.0, 0.0))
    }

    /// Frame where the planar point `anchor` sits at `(lat, lon)`.
    pub fn anchored(origin_lat: f64, origin_lon: f64, anchor: Point2D) -> Self {
        Self {
            origin_lat,
            origin_lon,
            anchor_x: anchor.x,
            anchor_y: anchor.y,
        }
    }

    /// Like [`LocalFrame::anchored`], rejecting non-finite or out-of-range coordinates.
    pub fn checked_anchored(origin_lat: f64, origin_lon: f64, anchor: Point2D) -> Result<Self> {
        if !origin_lat.is_finite() || !(-90.0..=90.0).contains(&origin_lat) {
            return Err(GeometryError::InvalidOrigin(format!(
                "latitude must be within [-90, 90], got {origin_lat}"
            )));
        }
        if !origin_lon.is_finite() || !(-180.0..=180.0).contains(&origin_lon) {
            return Err(GeometryError::InvalidOrigin(format!(
                "longitude must be within [-180, 180], got {origin_lon}"
            )));
        }
        if !(anchor.x.is_finite() && anchor.y.is_finite()) {
            return Err(GeometryError::InvalidOrigin(
                "anchor coordinates must be finite".to_string(),
            ));
        }
        Ok(Self::anchored(origin_lat, origin_lon, anchor))
    }

    pub fn to_geo(&self, point: Point3D) -> GeoPoint {
        let east_m = point.x - self.anchor_x;
        let north_m = point.y - self.anchor_y;
        GeoPoint {
            lon: self.origin_lon + meters_to_lon(east_m, self.origin_lat),
            lat: self.origin_lat + meters_to_lat(north_m, self.origin_lat),
            alt: point.z,
        }
    }

    pub fn to_planar(&self, geo: GeoPoint) -> Point3D {
        Point3D {
            x: self.anchor_x + (geo.lon - self.origin_lon) * meters_per_deg_lon(self.origin_lat),
            y: self.anchor_y + (geo.lat - self.origin_lat) * meters_per_deg_lat(self.origin_lat),
            z: geo.alt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn cardinal_bearings() {
        let o = Point2D::new(0.0, 0.0);
        assert!((planar_bearing(o, Point2D::new(0.0, 10.0)) - 0.0).abs() < EPS);
        assert!((planar_bearing(o, Point2D::new(10.0, 0.0)) - 90.0).abs() < EPS);
        assert!((planar_bearing(o, Point2D::new(0.0, -10.0)) - 180.0).abs() < EPS);
        assert!((planar_bearing(o, Point2D::new(-10.0, 0.0)) - 270.0).abs() < EPS);
    }

    #[test]
    fn normalize_wraps_both_ways() {
        assert!((normalize_bearing(-90.0) - 270.0).abs() < EPS);
        assert!((normalize_bearing(450.0) - 90.0).abs() < EPS);
        assert_eq!(normalize_bearing(360.0), 0.0);
        assert!(normalize_bearing(-1e-18) < 360.0);
    }

    #[test]
    fn project_keeps_elevation() {
        let p = project(Point3D::new(100.0, 200.0, 42.0), 50.0, 90.0);
        assert!((p.x - 150.0).abs() < EPS);
        assert!((p.y - 200.0).abs() < EPS);
        assert_eq!(p.z, 42.0);
    }

    #[test]
    fn project_diagonal() {
        let p = project(Point3D::new(0.0, 0.0, 0.0), 2f64.sqrt(), 45.0);
        assert!((p.x - 1.0).abs() < EPS);
        assert!((p.y - 1.0).abs() < EPS);
    }

    #[test]
    fn bearing_difference_takes_short_way() {
        assert!((bearing_difference(350.0, 10.0) - 20.0).abs() < EPS);
        assert!((bearing_difference(0.0, 180.0) - 180.0).abs() < EPS);
    }

    #[test]
    fn local_frame_one_km_north() {
        let frame = LocalFrame::new(33.0, -117.0);
        let geo = frame.to_geo(Point3D::new(0.0, 1000.0, 15.0));
        assert!((geo.lon + 117.0).abs() < 1e-12);
        assert!((geo.lat - 33.0 - meters_to_lat(1000.0, 33.0)).abs() < 1e-12);
        assert_eq!(geo.alt, 15.0);
    }

    #[test]
    fn checked_frame_rejects_bad_origins() {
        let anchor = Point2D::new(0.0, 0.0);
        assert!(LocalFrame::checked_anchored(90.0, -180.0, anchor).is_ok());
        for (lat, lon) in [(f64::NAN, 0.0), (95.0, 0.0), (0.0, 180.5), (0.0, f64::INFINITY)] {
            assert!(matches!(
                LocalFrame::checked_anchored(lat, lon, anchor),
                Err(GeometryError::InvalidOrigin(_))
            ));
        }
    }

    #[test]
    fn local_frame_round_trips_anchor_offsets() {
        let frame = LocalFrame::anchored(47.5, 8.5, Point2D::new(2_600_000.0, 1_200_000.0));
        let planar = Point3D::new(2_603_500.0, 1_195_250.0, 500.0);
        let back = frame.to_planar(frame.to_geo(planar));
        assert!((back.x - planar.x).abs() < 1e-6);
        assert!((back.y - planar.y).abs() < 1e-6);
    }
}
