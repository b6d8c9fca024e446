//! Geographic point type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{WindMapError, WindMapResult};

/// A WGS84 latitude/longitude pair in degrees.
///
/// `new` performs no range checks: geometry derived from a valid point (arrow
/// end points, barbs) may step slightly outside the valid range. Use
/// `try_new` for anything read from an upstream source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting non-finite or out-of-range coordinates.
    pub fn try_new(lat: f64, lon: f64) -> WindMapResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(WindMapError::InvalidInput(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(WindMapError::InvalidInput(format!(
                "longitude {} outside [-180, 180]",
                lon
            )));
        }
        Ok(Self { lat, lon })
    }

    /// Leaflet-style `[lat, lon]` pair.
    pub fn to_lat_lon(self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_accepts_bounds() {
        assert!(GeoPoint::try_new(90.0, 180.0).is_ok());
        assert!(GeoPoint::try_new(-90.0, -180.0).is_ok());
        assert!(GeoPoint::try_new(30.2672, -97.7431).is_ok());
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(matches!(
            GeoPoint::try_new(90.5, 0.0),
            Err(WindMapError::InvalidInput(_))
        ));
        assert!(matches!(
            GeoPoint::try_new(0.0, -180.5),
            Err(WindMapError::InvalidInput(_))
        ));
        assert!(GeoPoint::try_new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(GeoPoint::new(29.5, -98.25).to_string(), "(29.5, -98.25)");
    }
}
