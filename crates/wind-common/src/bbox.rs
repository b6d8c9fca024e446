//! Bounding box over a set of geographic points.

use serde::{Deserialize, Serialize};

use crate::GeoPoint;

/// Latitude/longitude extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.lat, first.lon, first.lat, first.lon);

        Some(points.iter().skip(1).fold(init, |acc, p| BoundingBox {
            min_lat: acc.min_lat.min(p.lat),
            min_lon: acc.min_lon.min(p.lon),
            max_lat: acc.max_lat.max(p.lat),
            max_lon: acc.max_lon.max(p.lon),
        }))
    }

    /// Extent in longitude degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Extent in latitude degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Check if a point is contained within this bbox.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        point.lat >= self.min_lat
            && point.lat <= self.max_lat
            && point.lon >= self.min_lon
            && point.lon <= self.max_lon
    }

    /// Slippy-map zoom level at which the larger side roughly fills the view.
    pub fn fit_zoom(&self) -> u8 {
        let span = self.width().max(self.height());
        if span <= 0.0 {
            return 10;
        }
        // 360 degrees fit a zoom-0 world tile; each level halves the span.
        let zoom = (360.0 / span).log2().floor();
        zoom.clamp(1.0, 12.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let points = [
            GeoPoint::new(29.7604, -95.3698),
            GeoPoint::new(32.7767, -96.7970),
            GeoPoint::new(31.7619, -106.4850),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.min_lat, 29.7604);
        assert_eq!(bbox.max_lat, 32.7767);
        assert_eq!(bbox.min_lon, -106.4850);
        assert_eq!(bbox.max_lon, -95.3698);
        assert!(points.iter().all(|p| bbox.contains(p)));
    }

    #[test]
    fn test_from_empty() {
        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_fit_zoom() {
        // Roughly the extent of Texas.
        let texas = BoundingBox::new(25.8, -106.6, 36.5, -93.5);
        assert_eq!(texas.fit_zoom(), 4);

        let single = BoundingBox::new(30.0, -97.0, 30.0, -97.0);
        assert_eq!(single.fit_zoom(), 10);
    }
}
