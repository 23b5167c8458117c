//! Surface generation against runways in arbitrary orientations.

use tofpa_core::{
    compute_bearing, generate, generate_from_centerline, Direction, GeometryError, Point2D,
    Point3D, RunwayCenterline, SurfaceParameters, ThresholdPoint,
};

fn orient(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> f64 {
    (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0)
}

/// Proper crossing of two segments; shared endpoints do not count.
fn segments_cross(a1: (f64, f64), a2: (f64, f64), b1: (f64, f64), b2: (f64, f64)) -> bool {
    const EPS: f64 = 1e-6;
    let o1 = orient(a1, a2, b1);
    let o2 = orient(a1, a2, b2);
    let o3 = orient(b1, b2, a1);
    let o4 = orient(b1, b2, a2);
    let a_crosses = (o1 > EPS && o2 < -EPS) || (o1 < -EPS && o2 > EPS);
    let b_crosses = (o3 > EPS && o4 < -EPS) || (o3 < -EPS && o4 > EPS);
    a_crosses && b_crosses
}

fn is_simple(ring: &[Point3D]) -> bool {
    let n = ring.len();
    let edge = |i: usize| {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        ((a.x, a.y), (b.x, b.y))
    };
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a1, a2) = edge(i);
            let (b1, b2) = edge(j);
            if segments_cross(a1, a2, b1, b2) {
                return false;
            }
        }
    }
    true
}

fn signed_area(ring: &[Point3D]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

#[test]
fn ring_is_simple_for_every_heading() {
    let params = SurfaceParameters {
        clearway_length: 120.0,
        ..Default::default()
    };
    for heading in (0..360).step_by(15) {
        let surface = generate(&ThresholdPoint::new(5000.0, -2500.0), &params, heading as f64).unwrap();
        let ring = surface.ring();
        assert!(is_simple(&ring), "self-intersecting ring at heading {heading}");
        // two trapezoids: flare then constant-width section
        let flare = (900.0 + 90.0) * 6480.0;
        let straight = 1800.0 * (10_000.0 - 6480.0);
        assert!((signed_area(&ring).abs() - (flare + straight)).abs() < 1e-3);
    }
}

#[test]
fn rotated_runway_both_directions() {
    // 09/27 style runway rotated off the grid
    let centerline = RunwayCenterline::new(vec![
        Point2D::new(683_512.4, 4_824_118.9),
        Point2D::new(684_730.0, 4_824_430.0),
        Point2D::new(686_291.7, 4_824_833.2),
    ]);

    let forward = compute_bearing(&centerline, Direction::FromStart).unwrap();
    let reverse = compute_bearing(&centerline, Direction::FromEnd).unwrap();
    assert!(forward.azimuth > 70.0 && forward.azimuth < 80.0);
    assert!(((reverse.azimuth - forward.azimuth).rem_euclid(360.0) - 180.0).abs() < 1e-9);

    let params = SurfaceParameters {
        initial_width: 180.0,
        max_width: 1200.0,
        clearway_length: 60.0,
        start_elevation: 104.2,
        end_elevation: 103.1,
        direction: Direction::FromEnd,
    };
    let threshold = ThresholdPoint::new(683_512.4, 4_824_118.9);
    let surface = generate_from_centerline(&centerline, &threshold, &params).unwrap();

    // departs away from the runway, towards the west-southwest
    assert!(surface.points.p3.x < threshold.x);
    assert!(surface.points.p3.y < threshold.y);
    assert!((surface.points.p1.z - 103.1).abs() < 1e-9);
    assert!((surface.points.p3.z - 223.1).abs() < 1e-9);
    assert!((surface.flare_distance - 4080.0).abs() < 1e-9);
}

#[test]
fn preconditions_are_reported_before_any_geometry() {
    let short = RunwayCenterline::new(vec![Point2D::new(0.0, 0.0)]);
    let err = generate_from_centerline(
        &short,
        &ThresholdPoint::new(0.0, 0.0),
        &SurfaceParameters::default(),
    )
    .unwrap_err();
    assert!(matches!(err, GeometryError::InvalidCenterline(_)));

    let line = RunwayCenterline::new(vec![Point2D::new(0.0, 0.0), Point2D::new(0.0, 1.0)]);
    let bad = SurfaceParameters {
        initial_width: 400.0,
        max_width: 399.0,
        ..Default::default()
    };
    let err = generate_from_centerline(&line, &ThresholdPoint::new(0.0, 0.0), &bad).unwrap_err();
    assert!(matches!(err, GeometryError::InvalidParameters(_)));
    assert!(err.to_string().starts_with("invalid surface parameters"));
}

#[test]
fn generation_from_many_threads_agrees() {
    let params = SurfaceParameters::default();
    let expected = generate(&ThresholdPoint::new(1.0, 2.0), &params, 33.0).unwrap();
    let handles: Vec<_> = (0..4)
        .map(|_| std::thread::spawn(move || generate(&ThresholdPoint::new(1.0, 2.0), &params, 33.0).unwrap()))
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
