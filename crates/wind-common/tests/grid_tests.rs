//! Tests for grid bucketing of turbine coordinates.

use std::collections::HashSet;

use wind_common::grid::{bucket, GridBuckets, GridKey};
use wind_common::{GeoPoint, WindMapError};

// ============================================================================
// Ordering and survivor tests
// ============================================================================

#[test]
fn test_first_seen_wins() {
    let p1 = GeoPoint::new(1.0, 1.0);
    let p2 = GeoPoint::new(1.2, 1.2);
    let p3 = GeoPoint::new(5.0, 5.0);

    assert_eq!(GridKey::for_point(&p1, 1.0), GridKey::new(1, 1));
    assert_eq!(GridKey::for_point(&p2, 1.0), GridKey::new(1, 1));

    let out = bucket(&[p1, p2, p3], 1.0).unwrap();
    assert_eq!(out, vec![p1, p3]);
}

#[test]
fn test_input_order_decides_survivor() {
    let p1 = GeoPoint::new(1.0, 1.0);
    let p2 = GeoPoint::new(1.2, 1.2);

    let out = bucket(&[p2, p1], 1.0).unwrap();
    assert_eq!(out, vec![p2]);
}

#[test]
fn test_bucketing_is_idempotent() {
    let points: Vec<GeoPoint> = (0..200)
        .map(|i| {
            let f = i as f64;
            GeoPoint::new(26.0 + (f * 0.37) % 10.0, -106.0 + (f * 0.53) % 12.0)
        })
        .collect();

    let first = bucket(&points, 0.5).unwrap();
    let second = bucket(&points, 0.5).unwrap();
    assert_eq!(first, second);

    // Re-bucketing the representatives changes nothing either.
    let again = bucket(&first, 0.5).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_output_keys_are_unique() {
    let points: Vec<GeoPoint> = (0..500)
        .map(|i| {
            let f = i as f64;
            GeoPoint::new(30.0 + (f * 0.013).sin() * 3.0, -100.0 + (f * 0.029).cos() * 4.0)
        })
        .collect();

    for grid_size in [0.1, 0.5, 1.0, 2.5] {
        let out = bucket(&points, grid_size).unwrap();
        let keys: HashSet<GridKey> = out
            .iter()
            .map(|p| GridKey::for_point(p, grid_size))
            .collect();
        assert_eq!(keys.len(), out.len(), "duplicate key at grid size {}", grid_size);
    }
}

#[test]
fn test_every_input_cell_is_represented() {
    let points = [
        GeoPoint::new(32.1, -101.2),
        GeoPoint::new(32.2, -101.3),
        GeoPoint::new(35.0, -101.0),
        GeoPoint::new(27.9, -97.4),
    ];
    let out = bucket(&points, 0.5).unwrap();

    let out_keys: HashSet<GridKey> = out.iter().map(|p| GridKey::for_point(p, 0.5)).collect();
    for p in &points {
        assert!(out_keys.contains(&GridKey::for_point(p, 0.5)));
    }
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(bucket(&[], 0.5).unwrap(), Vec::<GeoPoint>::new());
}

#[test]
fn test_huge_grid_keeps_one() {
    let points = [
        GeoPoint::new(29.76, -95.37),
        GeoPoint::new(32.78, -96.80),
        GeoPoint::new(31.76, -106.49),
    ];
    let out = bucket(&points, 1000.0).unwrap();
    assert_eq!(out, vec![points[0]]);
}

#[test]
fn test_zero_grid_size_rejected() {
    let result = bucket(&[GeoPoint::new(1.0, 1.0)], 0.0);
    assert!(matches!(result, Err(WindMapError::InvalidConfiguration(_))));
}

#[test]
fn test_negative_grid_size_rejected() {
    let result = bucket(&[GeoPoint::new(1.0, 1.0)], -0.5);
    assert!(matches!(result, Err(WindMapError::InvalidConfiguration(_))));
}

#[test]
fn test_grid_size_too_small_for_integer_keys_rejected() {
    let points = [
        GeoPoint::new(10.0, 10.0),
        GeoPoint::new(20.0, 20.0),
        GeoPoint::new(30.0, 40.0),
    ];
    let result = bucket(&points, 1e-18);
    assert!(matches!(result, Err(WindMapError::InvalidConfiguration(_))));

    // Tiny but representable sizes keep every distinct point.
    assert_eq!(bucket(&points, 1e-9).unwrap(), points.to_vec());
}

#[test]
fn test_empty_input_still_validates_grid_size() {
    assert!(bucket(&[], 0.0).is_err());
}

// ============================================================================
// GridBuckets tests
// ============================================================================

#[test]
fn test_buckets_keys_follow_insertion_order() {
    let mut buckets = GridBuckets::new(1.0).unwrap();
    buckets.extend([
        GeoPoint::new(5.0, 5.0),
        GeoPoint::new(1.0, 1.0),
        GeoPoint::new(5.1, 4.9),
        GeoPoint::new(-3.0, 2.0),
    ]);

    let keys: Vec<GridKey> = buckets.keys().collect();
    assert_eq!(
        keys,
        vec![GridKey::new(5, 5), GridKey::new(1, 1), GridKey::new(-3, 2)]
    );
    assert_eq!(buckets.grid_size(), 1.0);
}
