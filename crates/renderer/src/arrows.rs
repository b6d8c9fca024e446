//! Wind arrow geometry.
//!
//! Arrows are drawn directly in lat/lon space: the direction angle is treated
//! as a planar angle with cosine along latitude and sine along longitude.
//! This is a visual approximation, not a great-circle bearing projection.

use serde::{Deserialize, Serialize};
use wind_common::{classify, ColorBand, GeoPoint, WindMapResult, WindSample};

/// Degrees of arrow length per mph of wind speed.
pub const DEFAULT_ARROW_SCALE: f64 = 0.01;

/// Angle between each barb and the reversed shaft, in degrees.
pub const BARB_HALF_ANGLE_DEG: f64 = 30.0;

/// Barb length as a fraction of shaft length.
pub const BARB_LENGTH_RATIO: f64 = 0.5;

/// A straight two-point stroke tagged with the speed band it represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VectorSegment {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub band: ColorBand,
}

impl VectorSegment {
    /// Planar length in degrees.
    pub fn length(&self) -> f64 {
        let d_lat = self.end.lat - self.start.lat;
        let d_lon = self.end.lon - self.start.lon;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }
}

/// Shaft plus the two arrowhead strokes for one wind sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindArrow {
    pub shaft: VectorSegment,
    pub left_barb: VectorSegment,
    pub right_barb: VectorSegment,
}

impl WindArrow {
    pub fn band(&self) -> ColorBand {
        self.shaft.band
    }

    /// Segments in drawing order: shaft, left barb, right barb.
    pub fn segments(&self) -> [VectorSegment; 3] {
        [self.shaft, self.left_barb, self.right_barb]
    }
}

/// Offset `from` by `length` degrees along a planar angle.
fn project(from: GeoPoint, length: f64, angle_deg: f64) -> GeoPoint {
    let angle = angle_deg.to_radians();
    GeoPoint::new(
        from.lat + length * angle.cos(),
        from.lon + length * angle.sin(),
    )
}

/// Compute the arrow glyph for a wind sample at `origin`.
///
/// The shaft is `speed_mph * scale` degrees long. Both barbs start at the
/// shaft end, are half as long, and sit 30 degrees either side of the
/// reversed shaft direction. Fails only if the speed cannot be classified.
pub fn compute_arrow(
    origin: GeoPoint,
    speed_mph: f64,
    direction_deg: f64,
    scale: f64,
) -> WindMapResult<WindArrow> {
    let band = classify(speed_mph)?;

    let length = speed_mph * scale;
    let end = project(origin, length, direction_deg);

    let barb_length = BARB_LENGTH_RATIO * length;
    let left = project(end, barb_length, direction_deg + 180.0 + BARB_HALF_ANGLE_DEG);
    let right = project(end, barb_length, direction_deg + 180.0 - BARB_HALF_ANGLE_DEG);

    Ok(WindArrow {
        shaft: VectorSegment {
            start: origin,
            end,
            band,
        },
        left_barb: VectorSegment {
            start: end,
            end: left,
            band,
        },
        right_barb: VectorSegment {
            start: end,
            end: right,
            band,
        },
    })
}

/// Arrow construction for samples coming out of the pipeline.
pub trait WindSampleExt {
    fn arrow(&self, scale: f64) -> WindMapResult<WindArrow>;
}

impl WindSampleExt for WindSample {
    fn arrow(&self, scale: f64) -> WindMapResult<WindArrow> {
        compute_arrow(self.point, self.speed_mph, self.direction_deg, scale)
    }
}
