//! Synthetic turbine layouts.
//!
//! Deterministic so tests can assert exact counts without a random seed.

use wind_common::GeoPoint;

/// A rectangular farm of `rows * cols` turbines spaced `spacing` degrees apart,
/// starting at `origin` and growing north-east.
///
/// # Example
///
/// ```
/// use test_utils::turbine_farm;
/// use wind_common::GeoPoint;
///
/// let farm = turbine_farm(GeoPoint::new(32.0, -100.0), 3, 4, 0.01);
/// assert_eq!(farm.len(), 12);
/// assert_eq!(farm[0], GeoPoint::new(32.0, -100.0));
/// ```
pub fn turbine_farm(origin: GeoPoint, rows: usize, cols: usize, spacing: f64) -> Vec<GeoPoint> {
    let mut points = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            points.push(GeoPoint::new(
                origin.lat + row as f64 * spacing,
                origin.lon + col as f64 * spacing,
            ));
        }
    }
    points
}

/// Several farms laid end to end, interleaved so duplicates of a cell are
/// not adjacent in the output.
pub fn interleaved_farms(origins: &[GeoPoint], per_farm: usize, spacing: f64) -> Vec<GeoPoint> {
    let farms: Vec<Vec<GeoPoint>> = origins
        .iter()
        .map(|o| turbine_farm(*o, 1, per_farm, spacing))
        .collect();

    let mut points = Vec::with_capacity(origins.len() * per_farm);
    for i in 0..per_farm {
        for farm in &farms {
            points.push(farm[i]);
        }
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turbine_farm_layout() {
        let farm = turbine_farm(GeoPoint::new(10.0, 20.0), 2, 2, 0.5);
        assert_eq!(
            farm,
            vec![
                GeoPoint::new(10.0, 20.0),
                GeoPoint::new(10.0, 20.5),
                GeoPoint::new(10.5, 20.0),
                GeoPoint::new(10.5, 20.5),
            ]
        );
    }

    #[test]
    fn test_interleaved_farms() {
        let points = interleaved_farms(
            &[GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 10.0)],
            3,
            0.01,
        );
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], GeoPoint::new(0.0, 0.0));
        assert_eq!(points[1], GeoPoint::new(10.0, 10.0));
    }
}
