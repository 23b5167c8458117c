//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;
use tofpa_core::{Direction, Point2D, RunwayCenterline};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Generate a takeoff climb surface", long_about = None)]
pub struct Args {
    /// JSON request file with centerline, threshold, params and optional origin
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Runway centerline vertices as "x,y;x,y;..."
    #[arg(long, value_parser = parse_centerline, allow_hyphen_values = true)]
    pub centerline: Option<RunwayCenterline>,

    /// Threshold position as "x,y"
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub threshold: Option<Point2D>,

    /// Surface width at its start (m)
    #[arg(long)]
    pub initial_width: Option<f64>,

    /// Width the surface flares out to (m)
    #[arg(long)]
    pub max_width: Option<f64>,

    /// Clearway length beyond the threshold (m)
    #[arg(long)]
    pub clearway_length: Option<f64>,

    /// Threshold elevation (m)
    #[arg(long, allow_negative_numbers = true)]
    pub start_elevation: Option<f64>,

    /// Surface start elevation (m)
    #[arg(long, allow_negative_numbers = true)]
    pub end_elevation: Option<f64>,

    /// Departure end: from-start or from-end
    #[arg(long, value_parser = parse_direction)]
    pub direction: Option<Direction>,

    /// Write the surface as KMZ to this path
    #[arg(long)]
    pub kmz: Option<PathBuf>,

    /// Latitude of the threshold, for KMZ export
    #[arg(long, allow_negative_numbers = true, requires = "origin_lon")]
    pub origin_lat: Option<f64>,

    /// Longitude of the threshold, for KMZ export
    #[arg(long, allow_negative_numbers = true, requires = "origin_lat")]
    pub origin_lon: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

pub fn parse_point(value: &str) -> Result<Point2D, String> {
    let mut parts = value.split(',').map(str::trim);
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected \"x,y\", got \"{value}\""));
    };
    let x: f64 = x.parse().map_err(|_| format!("invalid x coordinate \"{x}\""))?;
    let y: f64 = y.parse().map_err(|_| format!("invalid y coordinate \"{y}\""))?;
    Ok(Point2D::new(x, y))
}

/// Vertex count is not checked here; the generator reports short centerlines.
pub fn parse_centerline(value: &str) -> Result<RunwayCenterline, String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_point)
        .collect::<Result<Vec<_>, _>>()
        .map(RunwayCenterline::new)
}

pub fn parse_direction(value: &str) -> Result<Direction, String> {
    Direction::parse(value).ok_or_else(|| format!("unknown direction \"{value}\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let line = parse_centerline("-10.5,20; 300,-4000.25").unwrap();
        assert_eq!(
            line.vertices,
            vec![Point2D::new(-10.5, 20.0), Point2D::new(300.0, -4000.25)]
        );
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(parse_point("1,2,3").is_err());
        assert!(parse_point("1").is_err());
        assert!(parse_point("a,2").is_err());
    }

    #[test]
    fn full_flag_set() {
        let args = Args::try_parse_from([
            "tofpa",
            "--centerline",
            "0,0;0,1000",
            "--threshold",
            "0,0",
            "--max-width",
            "1200",
            "--end-elevation",
            "-3.5",
            "--direction",
            "from-end",
            "--origin-lat",
            "-33.9",
            "--origin-lon",
            "151.2",
        ])
        .unwrap();
        assert_eq!(args.max_width, Some(1200.0));
        assert_eq!(args.end_elevation, Some(-3.5));
        assert_eq!(args.direction, Some(Direction::FromEnd));
        assert_eq!(args.origin_lat, Some(-33.9));
        assert_eq!(args.centerline.unwrap().vertices.len(), 2);
    }

    #[test]
    fn origin_requires_both_halves() {
        assert!(Args::try_parse_from(["tofpa", "--origin-lat", "10"]).is_err());
    }

    #[test]
    fn unknown_direction_is_rejected() {
        assert!(Args::try_parse_from(["tofpa", "--direction", "north"]).is_err());
    }
}
