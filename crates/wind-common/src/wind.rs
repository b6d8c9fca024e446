//! Wind readings as reported by a forecast grid.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

const KMH_PER_MPH: f64 = 1.609_344;

/// Speed and direction for a single forecast grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    /// Wind speed in miles per hour
    pub speed_mph: f64,
    /// Compass direction in degrees
    pub direction_deg: f64,
}

impl WindReading {
    pub fn new(speed_mph: f64, direction_deg: f64) -> Self {
        Self {
            speed_mph,
            direction_deg,
        }
    }

    /// Build from a speed in km/h, as the NWS gridpoint endpoint reports it.
    pub fn from_kmh(speed_kmh: f64, direction_deg: f64) -> Self {
        Self::new(speed_kmh / KMH_PER_MPH, direction_deg)
    }

    pub fn at(self, point: GeoPoint) -> WindSample {
        WindSample {
            point,
            speed_mph: self.speed_mph,
            direction_deg: self.direction_deg,
        }
    }
}

/// A wind reading attached to the representative point it was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    pub point: GeoPoint,
    pub speed_mph: f64,
    pub direction_deg: f64,
}

impl WindSample {
    pub fn reading(&self) -> WindReading {
        WindReading::new(self.speed_mph, self.direction_deg)
    }
}
