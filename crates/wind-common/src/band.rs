//! Discrete wind speed classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{WindMapError, WindMapResult};

/// Severity band for a wind speed in mph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorBand {
    Low,
    Medium,
    High,
    Severe,
}

/// A classification break: `min` inclusive, `max` exclusive, `None` unbounded.
struct BandBreak {
    min: f64,
    max: Option<f64>,
    band: ColorBand,
}

const BAND_BREAKS: [BandBreak; 4] = [
    BandBreak { min: 0.0, max: Some(10.0), band: ColorBand::Low },
    BandBreak { min: 10.0, max: Some(20.0), band: ColorBand::Medium },
    BandBreak { min: 20.0, max: Some(30.0), band: ColorBand::High },
    BandBreak { min: 30.0, max: None, band: ColorBand::Severe },
];

impl ColorBand {
    /// All bands, lowest first. Legend order.
    pub const ALL: [ColorBand; 4] = [
        ColorBand::Low,
        ColorBand::Medium,
        ColorBand::High,
        ColorBand::Severe,
    ];

    /// CSS color name used on the map.
    pub fn css_color(&self) -> &'static str {
        match self {
            ColorBand::Low => "blue",
            ColorBand::Medium => "green",
            ColorBand::High => "orange",
            ColorBand::Severe => "red",
        }
    }

    /// Legend label.
    pub fn label(&self) -> &'static str {
        match self {
            ColorBand::Low => "< 10 mph",
            ColorBand::Medium => "10 - 20 mph",
            ColorBand::High => "20 - 30 mph",
            ColorBand::Severe => "> 30 mph",
        }
    }

    /// Inclusive lower bound of the band in mph.
    pub fn min_mph(&self) -> f64 {
        BAND_BREAKS
            .iter()
            .find(|b| b.band == *self)
            .map(|b| b.min)
            .unwrap_or(0.0)
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ColorBand::Low => "low",
            ColorBand::Medium => "medium",
            ColorBand::High => "high",
            ColorBand::Severe => "severe",
        })
    }
}

/// Classify a wind speed in mph.
///
/// Negative and NaN speeds are rejected; upstream sources never report them.
pub fn classify(speed_mph: f64) -> WindMapResult<ColorBand> {
    if speed_mph.is_nan() || speed_mph < 0.0 {
        return Err(WindMapError::InvalidInput(format!(
            "wind speed must be non-negative, got {}",
            speed_mph
        )));
    }

    BAND_BREAKS
        .iter()
        .find(|b| speed_mph >= b.min && b.max.map_or(true, |max| speed_mph < max))
        .map(|b| b.band)
        .ok_or_else(|| WindMapError::InvalidInput(format!("unclassifiable speed {}", speed_mph)))
}
