//! Tests for wind arrow geometry.

use renderer::arrows::{compute_arrow, VectorSegment, WindSampleExt, DEFAULT_ARROW_SCALE};
use test_utils::assert_point_approx_eq;
use wind_common::{ColorBand, GeoPoint, WindMapError, WindSample};

const EPS: f64 = 1e-9;

/// Planar heading of a segment in degrees, using the lat=cos / lon=sin convention.
fn heading_deg(segment: &VectorSegment) -> f64 {
    let d_lat = segment.end.lat - segment.start.lat;
    let d_lon = segment.end.lon - segment.start.lon;
    d_lon.atan2(d_lat).to_degrees().rem_euclid(360.0)
}

/// Smallest signed difference between two headings, in (-180, 180].
fn angle_between(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

// ============================================================================
// Reference scenario
// ============================================================================

#[test]
fn test_north_arrow_reference_scenario() {
    let origin = GeoPoint::new(30.0, -97.0);
    let arrow = compute_arrow(origin, 20.0, 0.0, 0.01).unwrap();

    assert_eq!(arrow.shaft.start, origin);
    assert_point_approx_eq!(arrow.shaft.end, GeoPoint::new(30.2, -97.0), EPS);
    assert!((arrow.shaft.length() - 0.2).abs() < EPS);

    // Both barbs originate at the shaft end.
    assert_eq!(arrow.left_barb.start, arrow.shaft.end);
    assert_eq!(arrow.right_barb.start, arrow.shaft.end);

    // Half the shaft length.
    assert!((arrow.left_barb.length() - 0.1).abs() < EPS);
    assert!((arrow.right_barb.length() - 0.1).abs() < EPS);

    // They point back toward the origin.
    assert!(arrow.left_barb.end.lat < arrow.shaft.end.lat);
    assert!(arrow.right_barb.end.lat < arrow.shaft.end.lat);

    // At +/-30 degrees from the reversed shaft.
    let reverse = (heading_deg(&arrow.shaft) + 180.0).rem_euclid(360.0);
    let left = angle_between(heading_deg(&arrow.left_barb), reverse);
    let right = angle_between(heading_deg(&arrow.right_barb), reverse);
    assert!((left - 30.0).abs() < 1e-6, "left barb offset {}", left);
    assert!((right + 30.0).abs() < 1e-6, "right barb offset {}", right);
}

#[test]
fn test_barb_end_points_north_arrow() {
    let arrow = compute_arrow(GeoPoint::new(30.0, -97.0), 20.0, 0.0, 0.01).unwrap();
    let half_sqrt3 = 3f64.sqrt() / 2.0;

    // Left: 210 degrees from the shaft end.
    assert!((arrow.left_barb.end.lat - (30.2 - 0.1 * half_sqrt3)).abs() < EPS);
    assert!((arrow.left_barb.end.lon - (-97.0 - 0.05)).abs() < EPS);

    // Right: 150 degrees from the shaft end.
    assert!((arrow.right_barb.end.lat - (30.2 - 0.1 * half_sqrt3)).abs() < EPS);
    assert!((arrow.right_barb.end.lon - (-97.0 + 0.05)).abs() < EPS);
}

// ============================================================================
// Direction handling
// ============================================================================

#[test]
fn test_shaft_follows_direction() {
    let origin = GeoPoint::new(35.0, -101.0);
    let cases = [
        (0.0, (0.1, 0.0)),
        (90.0, (0.0, 0.1)),
        (180.0, (-0.1, 0.0)),
        (270.0, (0.0, -0.1)),
    ];

    for (direction, (d_lat, d_lon)) in cases {
        let arrow = compute_arrow(origin, 10.0, direction, 0.01).unwrap();
        assert!(
            (arrow.shaft.end.lat - (origin.lat + d_lat)).abs() < EPS,
            "lat mismatch at {} degrees",
            direction
        );
        assert!(
            (arrow.shaft.end.lon - (origin.lon + d_lon)).abs() < EPS,
            "lon mismatch at {} degrees",
            direction
        );
    }
}

#[test]
fn test_barbs_symmetric_for_any_direction() {
    let origin = GeoPoint::new(31.9686, -99.9018);
    for direction in [0.0, 15.0, 45.0, 123.0, 200.0, 315.0, 359.0] {
        let arrow = compute_arrow(origin, 25.0, direction, DEFAULT_ARROW_SCALE).unwrap();
        let reverse = (heading_deg(&arrow.shaft) + 180.0).rem_euclid(360.0);

        let left = angle_between(heading_deg(&arrow.left_barb), reverse);
        let right = angle_between(heading_deg(&arrow.right_barb), reverse);
        assert!((left - 30.0).abs() < 1e-6, "direction {}: left {}", direction, left);
        assert!((right + 30.0).abs() < 1e-6, "direction {}: right {}", direction, right);
    }
}

#[test]
fn test_direction_wraps_past_360() {
    let origin = GeoPoint::new(30.0, -97.0);
    let a = compute_arrow(origin, 15.0, 45.0, 0.01).unwrap();
    let b = compute_arrow(origin, 15.0, 405.0, 0.01).unwrap();
    for (x, y) in a.segments().iter().zip(b.segments().iter()) {
        assert!((x.end.lat - y.end.lat).abs() < EPS);
        assert!((x.end.lon - y.end.lon).abs() < EPS);
    }
}

// ============================================================================
// Scaling and color
// ============================================================================

#[test]
fn test_length_scales_with_speed() {
    let origin = GeoPoint::new(30.0, -97.0);
    let slow = compute_arrow(origin, 5.0, 60.0, 0.01).unwrap();
    let fast = compute_arrow(origin, 40.0, 60.0, 0.01).unwrap();
    assert!((slow.shaft.length() - 0.05).abs() < EPS);
    assert!((fast.shaft.length() - 0.4).abs() < EPS);
}

#[test]
fn test_all_segments_share_band() {
    let cases = [
        (4.0, ColorBand::Low),
        (12.0, ColorBand::Medium),
        (27.0, ColorBand::High),
        (45.0, ColorBand::Severe),
    ];
    for (speed, band) in cases {
        let arrow = compute_arrow(GeoPoint::new(30.0, -97.0), speed, 10.0, 0.01).unwrap();
        assert!(arrow.segments().iter().all(|s| s.band == band));
    }
}

#[test]
fn test_negative_speed_is_invalid_input() {
    let result = compute_arrow(GeoPoint::new(30.0, -97.0), -3.0, 0.0, 0.01);
    assert!(matches!(result, Err(WindMapError::InvalidInput(_))));
}

#[test]
fn test_sample_arrow_matches_compute_arrow() {
    let sample = WindSample {
        point: GeoPoint::new(29.4241, -98.4936),
        speed_mph: 18.0,
        direction_deg: 135.0,
    };
    let from_sample = sample.arrow(0.01).unwrap();
    let direct = compute_arrow(sample.point, 18.0, 135.0, 0.01).unwrap();
    assert_eq!(from_sample, direct);
}
