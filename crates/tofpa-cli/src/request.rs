//! Surface request assembly and the printed report.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tofpa_core::{
    runway_slope, LocalFrame, Point2D, Point3D, RunwayCenterline, Surface, SurfaceParameters, SurfacePoints,
    ThresholdPoint,
};

use crate::args::Args;

/// Geographic position of the threshold, degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    pub lat: f64,
    pub lon: f64,
}

/// Everything needed to generate (and optionally export) one surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceRequest {
    pub centerline: RunwayCenterline,
    pub threshold: Option<ThresholdPoint>,
    #[serde(default)]
    pub params: SurfaceParameters,
    #[serde(default)]
    pub origin: Option<Origin>,
}

impl SurfaceRequest {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading request file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing request file {}", path.display()))
    }

    /// Start from the request file when given, then apply every flag that was set.
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut request = match &args.request {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(centerline) = &args.centerline {
            request.centerline = centerline.clone();
        }
        if let Some(Point2D { x, y }) = args.threshold {
            request.threshold = Some(ThresholdPoint::new(x, y));
        }

        let params = &mut request.params;
        if let Some(v) = args.initial_width {
            params.initial_width = v;
        }
        if let Some(v) = args.max_width {
            params.max_width = v;
        }
        if let Some(v) = args.clearway_length {
            params.clearway_length = v;
        }
        if let Some(v) = args.start_elevation {
            params.start_elevation = v;
        }
        if let Some(v) = args.end_elevation {
            params.end_elevation = v;
        }
        if let Some(direction) = args.direction {
            params.direction = direction;
        }

        if let (Some(lat), Some(lon)) = (args.origin_lat, args.origin_lon) {
            request.origin = Some(Origin { lat, lon });
        }

        Ok(request)
    }

    /// Threshold as given, or the departure-end start vertex of the centerline.
    pub fn threshold(&self) -> Result<ThresholdPoint> {
        if let Some(threshold) = self.threshold {
            return Ok(threshold);
        }
        let (start, _) = self
            .centerline
            .endpoints(self.params.direction)
            .context("no --threshold given and the centerline cannot supply one")?;
        Ok(ThresholdPoint::new(start.x, start.y))
    }
}

impl SurfaceRequest {
    /// Frame pinning `threshold` to the request origin, for KMZ export.
    pub fn export_frame(&self, threshold: &ThresholdPoint) -> Result<LocalFrame> {
        let origin = self.origin.ok_or_else(|| {
            anyhow!("--kmz needs the threshold position: pass --origin-lat and --origin-lon")
        })?;
        let frame = LocalFrame::checked_anchored(
            origin.lat,
            origin.lon,
            Point2D::new(threshold.x, threshold.y),
        )?;
        Ok(frame)
    }
}

/// JSON printed for a generated surface.
#[derive(Debug, Clone, Serialize)]
pub struct SurfaceReport {
    pub name: &'static str,
    pub azimuth: f64,
    pub back_azimuth: f64,
    pub runway_length_m: f64,
    pub runway_slope: f64,
    pub flare_distance_m: f64,
    pub params: SurfaceParameters,
    pub points: SurfacePoints,
    pub ring: Vec<Point3D>,
}

impl SurfaceReport {
    pub fn new(centerline: &RunwayCenterline, surface: &Surface) -> Self {
        let length = centerline.length();
        Self {
            name: tofpa_core::SURFACE_NAME,
            azimuth: surface.azimuth,
            back_azimuth: surface.back_azimuth(),
            runway_length_m: length,
            runway_slope: runway_slope(
                surface.params.start_elevation,
                surface.params.end_elevation,
                length,
            ),
            flare_distance_m: surface.flare_distance,
            params: surface.params,
            points: surface.points,
            ring: surface.closed_ring(),
        }
    }
}
